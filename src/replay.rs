// Decision-log replay
//
// Reads the JSONL written by `debug_logger`, runs every logged board back
// through the current selection policy and sorts each turn into a match, a
// mismatch or a skip. Turns answered after a timeout or a dead worker are
// skipped: their logged move is the fallback, not something the selector chose.

use log::{debug, warn};
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::SelectionConfig;
use crate::debug_logger::MoveSource;
use crate::decision::{decide_move, Decision};
use crate::types::{Board, BoardSnapshot, Direction};

/// One line of the decision log
#[derive(Debug, Deserialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub you_id: String,
    pub chosen_move: Direction,
    #[serde(default)]
    pub source: MoveSource,
    pub board: Board,
    pub timestamp: String,
}

/// Reads a decision log, skipping blank lines. Errors name the offending line.
pub fn load_log<P: AsRef<Path>>(path: P) -> Result<Vec<LogEntry>, String> {
    let file =
        File::open(path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let entry = serde_json::from_str(&line)
            .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num, e))?;
        entries.push(entry);
    }

    debug!("Loaded {} log entries", entries.len());
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Match,
    Mismatch,
    /// The logged move did not come from the selector
    Skipped,
}

/// A logged turn next to the decision the current policy makes for it
#[derive(Debug, Clone)]
pub struct TurnReplay {
    pub turn: i32,
    pub logged_move: Direction,
    pub logged_source: MoveSource,
    pub decision: Decision,
    pub elapsed_us: u128,
}

impl TurnReplay {
    pub fn outcome(&self) -> Outcome {
        if !self.logged_source.is_reproducible() {
            Outcome::Skipped
        } else if self.logged_move == self.decision.direction {
            Outcome::Match
        } else {
            Outcome::Mismatch
        }
    }
}

/// Totals over a replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub replayed: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub skipped: usize,
    /// Turns where the replayed decision found nothing safe
    pub fallbacks: usize,
    /// Share of comparable (non-skipped) turns that matched, in percent
    pub match_rate: f64,
}

impl ReplayStats {
    pub fn from_turns(turns: &[TurnReplay]) -> Self {
        let mut stats = ReplayStats {
            replayed: turns.len(),
            ..ReplayStats::default()
        };

        for turn in turns {
            match turn.outcome() {
                Outcome::Match => stats.matches += 1,
                Outcome::Mismatch => stats.mismatches += 1,
                Outcome::Skipped => stats.skipped += 1,
            }
            if turn.decision.fallback {
                stats.fallbacks += 1;
            }
        }

        let compared = stats.matches + stats.mismatches;
        if compared > 0 {
            stats.match_rate = stats.matches as f64 * 100.0 / compared as f64;
        }
        stats
    }
}

/// Re-runs logged boards under a fixed selection policy
pub struct Replayer {
    selection: SelectionConfig,
}

impl Replayer {
    pub fn new(selection: SelectionConfig) -> Self {
        Replayer { selection }
    }

    /// Decides the logged board again for the snake that wrote the entry
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<TurnReplay, String> {
        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| {
                format!(
                    "Turn {}: snake '{}' not found on the logged board",
                    entry.turn, entry.you_id
                )
            })?;

        let started = Instant::now();
        let snapshot = BoardSnapshot::from_board(&entry.board, you);
        let decision = decide_move(&snapshot, &self.selection);

        Ok(TurnReplay {
            turn: entry.turn,
            logged_move: entry.chosen_move,
            logged_source: entry.source,
            decision,
            elapsed_us: started.elapsed().as_micros(),
        })
    }

    /// Replays every entry, or only `turns` when given.
    ///
    /// A requested turn missing from the log is an error. Without a turn list,
    /// entries that cannot be replayed are logged and left out.
    pub fn replay_log(
        &self,
        entries: &[LogEntry],
        turns: Option<&[i32]>,
    ) -> Result<Vec<TurnReplay>, String> {
        let turns = match turns {
            Some(turns) => turns,
            None => {
                return Ok(entries
                    .iter()
                    .filter_map(|entry| match self.replay_entry(entry) {
                        Ok(replay) => Some(replay),
                        Err(e) => {
                            warn!("{}", e);
                            None
                        }
                    })
                    .collect())
            }
        };

        turns
            .iter()
            .map(|turn| {
                let entry = find_turn(entries, *turn)?;
                self.replay_entry(entry)
            })
            .collect()
    }

    /// Replays each listed turn and checks that the current policy picks one
    /// of the acceptable moves.
    pub fn check_expectations(
        &self,
        entries: &[LogEntry],
        expected: &[(i32, Vec<Direction>)],
    ) -> Result<(), String> {
        for (turn, acceptable) in expected {
            let replay = self.replay_entry(find_turn(entries, *turn)?)?;
            let chosen = replay.decision.direction;

            if !acceptable.contains(&chosen) {
                let names: Vec<&str> = acceptable.iter().map(|d| d.as_str()).collect();
                return Err(format!(
                    "Turn {}: expected {}, replay chose {} (areas: {})",
                    turn,
                    names.join("|"),
                    chosen.as_str(),
                    area_summary(&replay.decision)
                ));
            }
        }

        Ok(())
    }
}

fn find_turn(entries: &[LogEntry], turn: i32) -> Result<&LogEntry, String> {
    entries
        .iter()
        .find(|e| e.turn == turn)
        .ok_or_else(|| format!("Turn {} not found in log", turn))
}

/// `up=12 left=30`, unsafe directions omitted
pub fn area_summary(decision: &Decision) -> String {
    let parts: Vec<String> = Direction::all()
        .iter()
        .filter(|dir| decision.safety.is_safe(**dir))
        .map(|dir| format!("{}={}", dir.as_str(), decision.scores.get(*dir)))
        .collect();

    if parts.is_empty() {
        "none safe".to_string()
    } else {
        parts.join(" ")
    }
}

/// Formats the session summary. `verbose` adds a per-turn table with the
/// reachable area behind every direction (`x` marks an unsafe one).
pub fn render_report(turns: &[TurnReplay], verbose: bool) -> String {
    let stats = ReplayStats::from_turns(turns);
    let mut out = String::new();

    let _ = writeln!(out, "Replayed turns: {}", stats.replayed);
    let _ = writeln!(out, "  matched:      {} ({:.1}%)", stats.matches, stats.match_rate);
    let _ = writeln!(out, "  mismatched:   {}", stats.mismatches);
    let _ = writeln!(out, "  skipped:      {}", stats.skipped);
    let _ = writeln!(out, "  fallbacks:    {}", stats.fallbacks);

    if !turns.is_empty() {
        let total_us: u128 = turns.iter().map(|t| t.elapsed_us).sum();
        let _ = writeln!(out, "  avg decide:   {}us", total_us / turns.len() as u128);
    }

    if verbose {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>5}  {:<6} {:<8} {:>5} {:>5} {:>5} {:>5}  note",
            "turn", "logged", "replayed", "up", "down", "left", "right"
        );
        for turn in turns {
            let _ = write!(
                out,
                "{:>5}  {:<6} {:<8}",
                turn.turn,
                turn.logged_move.as_str(),
                turn.decision.direction.as_str()
            );
            for dir in Direction::all().iter() {
                if turn.decision.safety.is_safe(*dir) {
                    let _ = write!(out, " {:>5}", turn.decision.scores.get(*dir));
                } else {
                    let _ = write!(out, " {:>5}", "x");
                }
            }
            let _ = writeln!(out, "  {}", note(turn));
        }
    }

    let mismatches: Vec<&TurnReplay> = turns
        .iter()
        .filter(|t| t.outcome() == Outcome::Mismatch)
        .collect();
    if !mismatches.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Mismatched turns:");
        for turn in mismatches {
            let _ = writeln!(
                out,
                "  turn {}: logged {}, replayed {} ({})",
                turn.turn,
                turn.logged_move.as_str(),
                turn.decision.direction.as_str(),
                area_summary(&turn.decision)
            );
        }
    }

    let skipped: Vec<String> = turns
        .iter()
        .filter(|t| t.outcome() == Outcome::Skipped)
        .map(|t| format!("{} ({})", t.turn, source_label(t.logged_source)))
        .collect();
    if !skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Skipped turns: {}", skipped.join(", "));
    }

    out
}

fn note(turn: &TurnReplay) -> String {
    let mut note = match turn.outcome() {
        Outcome::Match => "ok".to_string(),
        Outcome::Mismatch => "MISMATCH".to_string(),
        Outcome::Skipped => format!("skipped, {}", source_label(turn.logged_source)),
    };
    if turn.decision.fallback {
        note.push_str(", fallback");
    }
    note
}

fn source_label(source: MoveSource) -> &'static str {
    match source {
        MoveSource::Decided => "decided",
        MoveSource::Fallback => "fallback",
        MoveSource::TimedOut => "timed out",
        MoveSource::Failed => "failed",
    }
}
