// Move safety filter
//
// Starts from all four directions marked safe and narrows them with a fixed
// sequence of elimination rules. Rules only ever clear flags.

use crate::types::{BoardSnapshot, Coord, Direction};

/// Per-direction safety flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyMap {
    safe: [bool; 4],
}

impl SafetyMap {
    pub fn all_safe() -> Self {
        SafetyMap { safe: [true; 4] }
    }

    pub fn none_safe() -> Self {
        SafetyMap { safe: [false; 4] }
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        self.safe[dir.index()]
    }

    pub fn mark_unsafe(&mut self, dir: Direction) {
        self.safe[dir.index()] = false;
    }

    /// Safe directions in the default order (up, down, left, right)
    pub fn safe_directions(&self) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|&dir| self.is_safe(dir))
            .collect()
    }

    pub fn any_safe(&self) -> bool {
        self.safe.iter().any(|&s| s)
    }
}

/// Applies the reverse, boundary, self-collision and opponent-collision rules
/// in that order. A snapshot with an empty own body has no safe move.
pub fn safe_moves(snapshot: &BoardSnapshot) -> SafetyMap {
    let head = match snapshot.head() {
        Some(head) => head,
        None => return SafetyMap::none_safe(),
    };

    let mut safety = SafetyMap::all_safe();
    apply_reverse_rule(&mut safety, head, snapshot.neck());
    apply_boundary_rule(&mut safety, head, snapshot);
    apply_body_rule(&mut safety, head, &snapshot.you);
    for body in &snapshot.opponents {
        apply_body_rule(&mut safety, head, body);
    }
    safety
}

/// Disables the direction pointing back at the neck.
/// Skipped for single-segment bodies and for a neck stacked on the head.
fn apply_reverse_rule(safety: &mut SafetyMap, head: Coord, neck: Option<Coord>) {
    if let Some(dir) = neck.and_then(|neck| Direction::towards(&head, &neck)) {
        safety.mark_unsafe(dir);
    }
}

fn apply_boundary_rule(safety: &mut SafetyMap, head: Coord, snapshot: &BoardSnapshot) {
    for dir in Direction::all().iter() {
        if safety.is_safe(*dir) && !snapshot.in_bounds(&dir.apply(&head)) {
            safety.mark_unsafe(*dir);
        }
    }
}

/// Every segment counts, tail included, even though a non-growing snake
/// vacates its tail on the next turn.
fn apply_body_rule(safety: &mut SafetyMap, head: Coord, body: &[Coord]) {
    for dir in Direction::all().iter() {
        if safety.is_safe(*dir) && body.contains(&dir.apply(&head)) {
            safety.mark_unsafe(*dir);
        }
    }
}
