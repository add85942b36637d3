// Move selector
//
// Scores each safe direction by the area reachable from the cell the head
// would step into, then picks the largest area. Equal areas resolve to the
// earliest direction in the configured tie-break order.

use rayon::prelude::*;

use crate::grid::{reachable_area, Grid};
use crate::safety::SafetyMap;
use crate::types::{BoardSnapshot, Direction};

/// Reachable-area count per direction; unsafe directions stay at 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AreaScore {
    areas: [usize; 4],
}

impl AreaScore {
    pub fn get(&self, dir: Direction) -> usize {
        self.areas[dir.index()]
    }

    pub fn set(&mut self, dir: Direction, area: usize) {
        self.areas[dir.index()] = area;
    }
}

/// Flood-fills from the next head position of every safe direction.
///
/// The grid blocks all bodies, our own included, so a candidate cannot count
/// its way back through the snake. With `parallel` set the four fills run on
/// the rayon pool.
pub fn score_safe_moves(
    snapshot: &BoardSnapshot,
    safety: &SafetyMap,
    parallel: bool,
) -> AreaScore {
    let mut scores = AreaScore::default();
    let head = match snapshot.head() {
        Some(head) => head,
        None => return scores,
    };

    let grid = Grid::build(snapshot.width, snapshot.height, snapshot.bodies());
    let candidates = safety.safe_directions();

    let areas: Vec<(Direction, usize)> = if parallel {
        candidates
            .par_iter()
            .map(|&dir| (dir, reachable_area(&grid, dir.apply(&head))))
            .collect()
    } else {
        candidates
            .iter()
            .map(|&dir| (dir, reachable_area(&grid, dir.apply(&head))))
            .collect()
    };

    for (dir, area) in areas {
        scores.set(dir, area);
    }
    scores
}

/// Picks the safe direction with the strictly largest score, scanning in
/// `order` and then any direction `order` leaves out. Answers `fallback` only
/// when nothing is safe.
pub fn select<F>(
    safety: &SafetyMap,
    order: &[Direction],
    fallback: Direction,
    score: F,
) -> Direction
where
    F: Fn(Direction) -> usize,
{
    let unlisted: Vec<Direction> = Direction::all()
        .iter()
        .copied()
        .filter(|dir| !order.contains(dir))
        .collect();

    let mut best: Option<(Direction, usize)> = None;

    for dir in order.iter().copied().chain(unlisted) {
        if !safety.is_safe(dir) {
            continue;
        }
        let area = score(dir);
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((dir, area)),
        }
    }

    best.map(|(dir, _)| dir).unwrap_or(fallback)
}
