// Occupancy grid and reachable-area flood fill
//
// The grid is rebuilt from the snapshot every turn and never mutated after
// construction. Flood fill keeps its own visited bitmap, so a single grid can
// be shared read-only by every direction being scored.

use crate::types::Coord;

/// Width x height occupancy map, true = blocked by a snake body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Builds a grid with every cell free, then blocks every cell covered by
    /// any of the given bodies. Coordinates outside the board are ignored.
    pub fn build<'a, I>(width: i32, height: i32, bodies: I) -> Self
    where
        I: IntoIterator<Item = &'a [Coord]>,
    {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        let mut grid = Grid {
            width,
            height,
            blocked: vec![false; cells],
        };

        for body in bodies {
            for coord in body {
                if let Some(idx) = grid.index(coord) {
                    grid.blocked[idx] = true;
                }
            }
        }

        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Out-of-bounds cells count as blocked
    pub fn is_blocked(&self, coord: &Coord) -> bool {
        match self.index(coord) {
            Some(idx) => self.blocked[idx],
            None => true,
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    fn index(&self, coord: &Coord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Counts the free cells 4-connected to `start`, including `start` itself.
///
/// Returns 0 when `start` is off the board or blocked. Uses an explicit
/// work-list so board size never translates into call-stack depth; every
/// cell is marked visited before its neighbours are queued, so each cell is
/// counted at most once.
pub fn reachable_area(grid: &Grid, start: Coord) -> usize {
    let start_idx = match grid.index(&start) {
        Some(idx) if !grid.blocked[idx] => idx,
        _ => return 0,
    };

    let mut visited = vec![false; grid.blocked.len()];
    let mut frontier = vec![start];
    visited[start_idx] = true;
    let mut count = 0;

    while let Some(cell) = frontier.pop() {
        count += 1;

        for (dx, dy) in NEIGHBOR_OFFSETS.iter() {
            let next = Coord {
                x: cell.x + dx,
                y: cell.y + dy,
            };
            if let Some(idx) = grid.index(&next) {
                if !grid.blocked[idx] && !visited[idx] {
                    visited[idx] = true;
                    frontier.push(next);
                }
            }
        }
    }

    count
}
