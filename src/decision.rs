// Single-turn decision pipeline: snapshot -> safety map -> area scores -> move

use log::debug;

use crate::config::SelectionConfig;
use crate::safety::{safe_moves, SafetyMap};
use crate::selector::{score_safe_moves, select, AreaScore};
use crate::types::{BoardSnapshot, Direction};

/// Outcome of one turn's evaluation, kept whole for logging and replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub safety: SafetyMap,
    pub scores: AreaScore,
    /// True when no direction was safe and the configured fallback was answered
    pub fallback: bool,
}

/// Chooses exactly one move for the snapshot. Never fails: a snapshot with no
/// safe direction answers `selection.fallback`.
pub fn decide_move(snapshot: &BoardSnapshot, selection: &SelectionConfig) -> Decision {
    let safety = safe_moves(snapshot);
    debug!("Safe moves: {:?}", safety.safe_directions());

    if !safety.any_safe() {
        return Decision {
            direction: selection.fallback,
            safety,
            scores: AreaScore::default(),
            fallback: true,
        };
    }

    let scores = score_safe_moves(snapshot, &safety, selection.parallel_scoring);
    debug!("Area scores: {:?}", scores);

    let direction = select(
        &safety,
        &selection.tie_break_order,
        selection.fallback,
        |dir| scores.get(dir),
    );

    Decision {
        direction,
        safety,
        scores,
        fallback: false,
    }
}
