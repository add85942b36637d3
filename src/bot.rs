// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Each turn the snake drops every move that is immediately fatal, then takes
// the remaining move that opens onto the largest reachable area.

use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::{DebugLogger, MoveSource};
use crate::decision::{decide_move, Decision};
use crate::types::{Battlesnake, Board, BoardSnapshot, Direction, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no decision log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decision through `logger`
    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Runs the decision pipeline synchronously on the current thread
    pub fn decide(&self, board: &Board, you: &Battlesnake) -> Decision {
        let snapshot = BoardSnapshot::from_board(board, you);
        decide_move(&snapshot, &self.config.selection)
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The evaluation runs on a blocking worker bounded by the effective time
    /// budget. If the worker overruns or fails, the configured fallback move is
    /// answered so the turn is never left without a response.
    ///
    /// # Arguments
    /// * `_game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        let snapshot = BoardSnapshot::from_board(board, you);
        let selection = self.config.selection.clone();
        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());

        let worker = tokio::task::spawn_blocking(move || decide_move(&snapshot, &selection));

        let (chosen_move, source) = match tokio::time::timeout(budget, worker).await {
            Ok(Ok(decision)) => {
                if decision.fallback {
                    warn!(
                        "Turn {}: No safe moves detected! Moving {}",
                        turn,
                        decision.direction.as_str()
                    );
                }
                info!(
                    "Turn {}: Chose {} (areas: {}, time: {}ms)",
                    turn,
                    decision.direction.as_str(),
                    Self::format_scores(&decision),
                    start_time.elapsed().as_millis()
                );
                let source = if decision.fallback {
                    MoveSource::Fallback
                } else {
                    MoveSource::Decided
                };
                (decision.direction, source)
            }
            Ok(Err(e)) => {
                error!("Turn {}: Move computation failed: {}", turn, e);
                (self.config.selection.fallback, MoveSource::Failed)
            }
            Err(_) => {
                warn!(
                    "Turn {}: Exceeded {}ms budget, answering {}",
                    turn,
                    budget.as_millis(),
                    self.config.selection.fallback.as_str()
                );
                (self.config.selection.fallback, MoveSource::TimedOut)
            }
        };

        self.logger
            .log_move(*turn, &you.id, board.clone(), chosen_move, source);

        json!({ "move": chosen_move.as_str() })
    }

    fn format_scores(decision: &Decision) -> String {
        Direction::all()
            .iter()
            .filter(|&&dir| decision.safety.is_safe(dir))
            .map(|dir| format!("{}={}", dir.as_str(), decision.scores.get(*dir)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
