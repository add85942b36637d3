// Behavioural properties of the move decision
//
// Each test builds a small board by hand and checks one guarantee of the
// decision pipeline: totality, never reversing, staying on the board,
// flood-fill counts, repeatability, preferring the larger room, and the
// deterministic fallback.

use floodfill_snake::config::SelectionConfig;
use floodfill_snake::decision::decide_move;
use floodfill_snake::grid::{reachable_area, Grid};
use floodfill_snake::types::{BoardSnapshot, Coord, Direction};

fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

fn snapshot(width: i32, height: i32, you: Vec<Coord>, opponents: Vec<Vec<Coord>>) -> BoardSnapshot {
    BoardSnapshot {
        width,
        height,
        you,
        opponents,
    }
}

#[test]
fn test_every_board_gets_a_move() {
    let selection = SelectionConfig::default();
    let boards = vec![
        snapshot(11, 11, vec![c(5, 5), c(5, 4), c(5, 3)], vec![]),
        snapshot(1, 1, vec![c(0, 0)], vec![]),
        snapshot(2, 1, vec![c(0, 0), c(1, 0)], vec![]),
        snapshot(7, 7, vec![c(3, 3)], vec![vec![c(3, 4), c(2, 4)], vec![c(4, 3), c(4, 2)]]),
        snapshot(5, 5, vec![], vec![]),
    ];

    for board in &boards {
        let decision = decide_move(board, &selection);
        assert!(Direction::all().contains(&decision.direction));
    }
}

#[test]
fn test_never_moves_back_into_neck() {
    // Moving right: head (5,5), neck (4,5)
    let board = snapshot(11, 11, vec![c(5, 5), c(4, 5), c(3, 5)], vec![]);
    let decision = decide_move(&board, &SelectionConfig::default());

    assert_ne!(decision.direction, Direction::Left);
    assert!(!decision.fallback);
}

#[test]
fn test_never_moves_back_into_neck_when_boxed_in() {
    // Opponent curls around the head; only the neck side is unoccupied
    let board = snapshot(
        11,
        11,
        vec![c(9, 5), c(8, 5)],
        vec![vec![c(9, 6), c(10, 6), c(10, 5), c(10, 4), c(9, 4)]],
    );
    let decision = decide_move(&board, &SelectionConfig::default());

    assert_ne!(decision.direction, Direction::Left);
    assert!(decision.fallback);
}

#[test]
fn test_corner_only_leaves_through_open_side() {
    // 3x3, head in bottom-left corner, neck to the right
    let board = snapshot(3, 3, vec![c(0, 0), c(1, 0)], vec![]);
    let decision = decide_move(&board, &SelectionConfig::default());

    assert_eq!(decision.direction, Direction::Up);
    assert_ne!(decision.direction, Direction::Down);
    assert_ne!(decision.direction, Direction::Left);
}

#[test]
fn test_corner_with_blocked_exit_falls_back() {
    let board = snapshot(3, 3, vec![c(0, 0), c(1, 0)], vec![vec![c(0, 1), c(0, 2)]]);
    let decision = decide_move(&board, &SelectionConfig::default());

    assert_eq!(decision.direction, Direction::Down);
    assert!(decision.fallback);
}

#[test]
fn test_flood_fill_counts_whole_empty_board() {
    let grid = Grid::build(5, 5, Vec::<&[Coord]>::new());

    for x in 1..4 {
        for y in 1..4 {
            assert_eq!(reachable_area(&grid, c(x, y)), 25);
        }
    }
}

#[test]
fn test_flood_fill_excludes_seeding_body() {
    let body = vec![c(0, 0), c(0, 1), c(0, 2)];
    let grid = Grid::build(5, 5, vec![body.as_slice()]);
    assert_eq!(reachable_area(&grid, c(2, 2)), 22);
}

#[test]
fn test_grid_construction_is_repeatable() {
    let board = snapshot(
        6,
        6,
        vec![c(2, 2), c(2, 1)],
        vec![vec![c(4, 4), c(4, 3), c(4, 2)]],
    );

    let first = Grid::build(board.width, board.height, board.bodies());
    let second = Grid::build(board.width, board.height, board.bodies());
    assert_eq!(first, second);
}

#[test]
fn test_sequential_decisions_do_not_leak_state() {
    let selection = SelectionConfig::default();
    let open = snapshot(11, 11, vec![c(5, 5), c(5, 4)], vec![]);
    let cornered = snapshot(3, 3, vec![c(0, 0), c(1, 0)], vec![]);

    let open_first = decide_move(&open, &selection);
    let cornered_decision = decide_move(&cornered, &selection);
    let open_second = decide_move(&open, &selection);

    assert_eq!(open_first, open_second);
    assert_eq!(cornered_decision.direction, Direction::Up);
}

/// 6x6 board. Opponent cells (0,1) and (1,1) plus our neck at (2,1) seal off
/// a two-cell pocket at (0,0),(1,0). Everything to the right is open.
fn pocket_board() -> BoardSnapshot {
    snapshot(6, 6, vec![c(2, 0), c(2, 1)], vec![vec![c(1, 1), c(0, 1)]])
}

#[test]
fn test_prefers_larger_room() {
    let decision = decide_move(&pocket_board(), &SelectionConfig::default());

    assert_eq!(decision.scores.get(Direction::Left), 2);
    assert_eq!(decision.scores.get(Direction::Right), 30);
    assert_eq!(decision.direction, Direction::Right);
}

#[test]
fn test_prefers_larger_room_regardless_of_tie_break_order() {
    let selection = SelectionConfig {
        tie_break_order: vec![Direction::Left, Direction::Down, Direction::Up, Direction::Right],
        ..SelectionConfig::default()
    };

    let decision = decide_move(&pocket_board(), &selection);
    assert_eq!(decision.direction, Direction::Right);
}

#[test]
fn test_prefers_larger_room_with_parallel_scoring_disabled() {
    let selection = SelectionConfig {
        parallel_scoring: false,
        ..SelectionConfig::default()
    };

    let decision = decide_move(&pocket_board(), &selection);
    assert_eq!(decision.direction, Direction::Right);
}

#[test]
fn test_boxed_in_by_own_body_falls_back_every_time() {
    // Head on the bottom edge, own body on the left, above and right
    let board = snapshot(
        6,
        6,
        vec![c(2, 0), c(1, 0), c(1, 1), c(2, 1), c(3, 1), c(3, 0)],
        vec![],
    );
    let selection = SelectionConfig::default();

    let first = decide_move(&board, &selection);
    assert_eq!(first.direction, Direction::Down);
    assert!(first.fallback);

    for _ in 0..10 {
        assert_eq!(decide_move(&board, &selection), first);
    }
}
