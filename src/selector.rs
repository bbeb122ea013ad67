// Move selection over the surviving candidates
//
// The center-bias rule awards a corner-avoidance bonus to candidates that move
// closer to the board center on one axis, then picks the LOWEST score. That
// steers away from the center rather than toward it. The behavior is kept as
// the snake has always played it; flipping the comparison changes which moves
// the snake makes.

use log::debug;
use rand::Rng;

use crate::config::{Heuristic, SelectorConfig};
use crate::moves::{CandidateMove, MoveSet};
use crate::types::{Board, Coord, Direction};

/// The chosen direction plus the text sent back as `shout`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub shout: String,
}

/// Board center using truncating division
pub fn board_center(board: &Board) -> Coord {
    Coord {
        x: board.width / 2,
        y: board.height / 2,
    }
}

/// Scores one candidate. The vertical axis is only consulted when the
/// horizontal one does not improve, so the bonus is applied at most once.
pub fn center_bias_score(candidate: Coord, head: Coord, center: Coord, bonus: i32) -> i32 {
    if candidate.x.abs_diff(center.x) < head.x.abs_diff(center.x) {
        return bonus;
    }
    if candidate.y.abs_diff(center.y) < head.y.abs_diff(center.y) {
        return bonus;
    }
    0
}

/// Lowest score wins; ties go to the first candidate in `Direction::all()` order
fn pick_center_bias(moves: &MoveSet, head: Coord, board: &Board, bonus: i32) -> Option<Direction> {
    let center = board_center(board);
    let rated: Vec<(CandidateMove, i32)> = moves
        .iter()
        .map(|candidate| {
            let score = center_bias_score(candidate.coord, head, center, bonus);
            (candidate, score)
        })
        .collect();

    debug!(
        "Rated moves: {:?}",
        rated
            .iter()
            .map(|(c, s)| (c.direction.as_str(), *s))
            .collect::<Vec<_>>()
    );

    rated
        .iter()
        .min_by_key(|(_, score)| *score)
        .map(|(candidate, _)| candidate.direction)
}

fn pick_random<R: Rng>(moves: &MoveSet, rng: &mut R) -> Option<Direction> {
    let directions = moves.directions();
    if directions.is_empty() {
        return None;
    }
    Some(directions[rng.random_range(0..directions.len())])
}

/// Seed for one turn's generator. The server and the replay tool both derive
/// it here so a logged game under the random heuristic replays move for move.
pub fn turn_seed(base: u64, turn: i32) -> u64 {
    base ^ (turn as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Picks exactly one direction for every input, including an empty set
pub fn choose_move<R: Rng>(
    moves: &MoveSet,
    head: Coord,
    board: &Board,
    config: &SelectorConfig,
    rng: &mut R,
) -> Decision {
    let picked = match config.heuristic {
        Heuristic::CenterBias => {
            pick_center_bias(moves, head, board, config.corner_avoidance_bonus)
        }
        Heuristic::Random => pick_random(moves, rng),
    };

    match picked {
        Some(direction) => Decision {
            direction,
            shout: String::new(),
        },
        None => Decision {
            direction: config.fallback_move,
            shout: config.no_moves_shout.clone(),
        },
    }
}
