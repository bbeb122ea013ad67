// Survival filter tests
//
// Covers the documented scenarios plus a seeded sweep over random boards
// checking that no surviving move lands on a wall, hazard or body cell, and
// that every removed move does.

mod common;

use centerline_snake::moves::{is_hazard, is_out_of_bounds, is_snake_body, safe_moves};
use centerline_snake::types::{Board, Direction};
use common::{board, c, snake};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scenario A: left wall and own neck remove two of four moves
#[test]
fn test_head_on_left_wall_with_neck_below() {
    let me = snake("me", vec![c(0, 5), c(0, 4)]);
    let b = board(11, 11, vec![me.clone()], vec![]);

    let moves = safe_moves(me.head, &b);

    assert_eq!(moves.directions(), vec![Direction::Right, Direction::Up]);
    assert_eq!(moves.get(Direction::Right), Some(c(1, 5)));
    assert_eq!(moves.get(Direction::Up), Some(c(0, 6)));
}

/// Scenario C: boxed in by a hazard, an opponent and our own body
#[test]
fn test_fully_enclosed_head_has_no_moves() {
    let me = snake("me", vec![c(5, 5), c(5, 4), c(4, 4), c(4, 5)]);
    let other = snake("other", vec![c(6, 5), c(7, 5), c(8, 5)]);
    let b = board(11, 11, vec![me.clone(), other], vec![c(5, 6)]);

    assert!(safe_moves(me.head, &b).is_empty());
}

#[test]
fn test_hazard_blocks_move() {
    let me = snake("me", vec![c(3, 3)]);
    let b = board(11, 11, vec![me.clone()], vec![c(3, 4), c(9, 9)]);

    let moves = safe_moves(me.head, &b);
    assert!(!moves.contains(Direction::Up));
    assert_eq!(moves.len(), 3);
}

#[test]
fn test_opponent_tail_is_treated_as_solid() {
    let me = snake("me", vec![c(3, 3)]);
    let other = snake("other", vec![c(6, 3), c(5, 3), c(4, 3)]);
    let b = board(11, 11, vec![me.clone(), other], vec![]);

    assert!(!safe_moves(me.head, &b).contains(Direction::Right));
}

#[test]
fn test_stacked_body_segments_block_once() {
    // Freshly spawned snakes have all segments stacked on one cell
    let me = snake("me", vec![c(1, 1)]);
    let other = snake("other", vec![c(2, 1), c(2, 1), c(2, 1)]);
    let b = board(11, 11, vec![me.clone(), other], vec![]);

    let moves = safe_moves(me.head, &b);
    assert_eq!(
        moves.directions(),
        vec![Direction::Down, Direction::Left, Direction::Up]
    );
}

#[test]
fn test_top_right_corner() {
    let me = snake("me", vec![c(10, 10), c(9, 10)]);
    let b = board(11, 11, vec![me.clone()], vec![]);

    assert_eq!(safe_moves(me.head, &b).directions(), vec![Direction::Down]);
}

#[test]
fn test_non_square_board_bounds() {
    let me = snake("me", vec![c(6, 2)]);
    let b = board(7, 3, vec![me.clone()], vec![]);

    assert_eq!(
        safe_moves(me.head, &b).directions(),
        vec![Direction::Down, Direction::Left]
    );
}

#[test]
fn test_out_of_range_head_does_not_panic() {
    let me = snake("me", vec![c(-4, 20)]);
    let b = board(11, 11, vec![], vec![]);
    assert!(safe_moves(me.head, &b).is_empty());

    let extreme = snake("me", vec![c(i32::MAX, i32::MIN)]);
    assert!(safe_moves(extreme.head, &b).is_empty());
}

fn random_board(rng: &mut StdRng, width: i32, height: i32) -> Board {
    let mut cell = |rng: &mut StdRng| c(rng.random_range(0..width), rng.random_range(0..height));

    let hazards = (0..rng.random_range(0..8)).map(|_| cell(rng)).collect();
    let snakes = (0..rng.random_range(1..4))
        .map(|i| {
            let len = rng.random_range(1..6);
            let body = (0..len).map(|_| cell(rng)).collect();
            snake(&format!("s{}", i), body)
        })
        .collect();

    board(width, height, snakes, hazards)
}

#[test]
fn test_survivors_are_exactly_the_safe_neighbors() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let width = rng.random_range(1..12);
        let height = rng.random_range(1..12);
        let b = random_board(&mut rng, width, height);

        for x in 0..width {
            for y in 0..height {
                let head = c(x, y);
                let moves = safe_moves(head, &b);

                for dir in Direction::all().iter() {
                    let next = dir.apply(&head);
                    let lethal = is_out_of_bounds(&next, b.width, b.height)
                        || is_hazard(&next, &b)
                        || is_snake_body(&next, &b);

                    assert_eq!(
                        moves.contains(*dir),
                        !lethal,
                        "head {:?} dir {} on {}x{}",
                        head,
                        dir,
                        width,
                        height
                    );
                    if let Some(coord) = moves.get(*dir) {
                        assert_eq!(coord, next);
                        assert!(coord.x >= 0 && coord.x < width);
                        assert!(coord.y >= 0 && coord.y < height);
                        assert!(!b.hazards.contains(&coord));
                        assert!(b.snakes.iter().all(|s| !s.body.contains(&coord)));
                    }
                }
            }
        }
    }
}

#[test]
fn test_filter_ignores_snake_order() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let b = random_board(&mut rng, 9, 9);
        let mut reversed = b.clone();
        reversed.snakes.reverse();
        reversed.hazards.reverse();

        for x in 0..9 {
            for y in 0..9 {
                assert_eq!(safe_moves(c(x, y), &b), safe_moves(c(x, y), &reversed));
            }
        }
    }
}
