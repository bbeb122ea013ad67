// Candidate move generation and survival filtering
//
// Builds the four neighbor cells of the head and drops every one that would
// kill the snake this turn: walls, hazards and any snake body segment
// (including our own neck and tail). The result is a fixed-order set so
// that nothing downstream depends on iteration order.

use log::debug;

use crate::types::{Board, Coord, Direction};

/// A direction paired with the head position it would produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    pub direction: Direction,
    pub coord: Coord,
}

/// At most one candidate per direction, always iterated in `Direction::all()` order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSet {
    slots: [Option<Coord>; 4],
}

impl MoveSet {
    pub fn new() -> Self {
        MoveSet::default()
    }

    pub fn insert(&mut self, direction: Direction, coord: Coord) {
        self.slots[direction.index()] = Some(coord);
    }

    /// Removing an absent direction is a no-op
    pub fn remove(&mut self, direction: Direction) -> Option<Coord> {
        self.slots[direction.index()].take()
    }

    pub fn get(&self, direction: Direction) -> Option<Coord> {
        self.slots[direction.index()]
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.get(direction).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = CandidateMove> + '_ {
        let directions = Direction::all();
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|coord| CandidateMove {
                direction: directions[i],
                coord,
            })
        })
    }

    pub fn directions(&self) -> Vec<Direction> {
        self.iter().map(|candidate| candidate.direction).collect()
    }
}

/// All four neighbors of `head`, before any filtering
pub fn all_candidates(head: Coord) -> MoveSet {
    let mut moves = MoveSet::new();
    for dir in Direction::all().iter() {
        moves.insert(*dir, dir.apply(&head));
    }
    moves
}

/// Checks if a coordinate is outside `[0, width) x [0, height)`
pub fn is_out_of_bounds(coord: &Coord, board_width: i32, board_height: i32) -> bool {
    coord.x < 0 || coord.x >= board_width || coord.y < 0 || coord.y >= board_height
}

pub fn is_hazard(coord: &Coord, board: &Board) -> bool {
    board.hazards.contains(coord)
}

/// Checks every body segment of every snake, tails and stacked segments included
pub fn is_snake_body(coord: &Coord, board: &Board) -> bool {
    board.snakes.iter().any(|snake| snake.body.contains(coord))
}

/// Returns the moves from `head` that do not end the game for us this turn
pub fn safe_moves(head: Coord, board: &Board) -> MoveSet {
    let mut moves = all_candidates(head);
    debug!("Possible moves: {:?}", moves.directions());

    for candidate in all_candidates(head).iter() {
        let coord = candidate.coord;
        let reason = if is_out_of_bounds(&coord, board.width, board.height) {
            Some("wall")
        } else if is_hazard(&coord, board) {
            Some("hazard")
        } else if is_snake_body(&coord, board) {
            Some("snake")
        } else {
            None
        };

        if let Some(reason) = reason {
            debug!(
                "Removing move {} to ({}, {}) for colliding with {}",
                candidate.direction, coord.x, coord.y, reason
            );
            moves.remove(candidate.direction);
        }
    }

    debug!("Moves remaining: {:?}", moves.directions());
    moves
}
