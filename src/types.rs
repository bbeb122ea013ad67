// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseDirectionError;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    #[serde(default)]
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation as sent by the game engine
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// Last body segment, `None` for an empty body
    pub fn tail(&self) -> Option<Coord> {
        self.body.last().copied()
    }
}

/// 2D coordinate on the board. x grows rightward, y grows upward.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a Battlesnake.
///
/// Variants are declared in lexical order of their names; `Ord` and
/// `all()` follow that order and the move selector breaks ties with it.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// Returns all possible directions in canonical order
    pub fn all() -> [Direction; 4] {
        [Direction::Down, Direction::Left, Direction::Right, Direction::Up]
    }

    /// Position of this direction in `all()`
    pub fn index(self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// Saturates at the i32 range instead of overflowing.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y.saturating_add(1) },
            Direction::Down => Coord { x: coord.x, y: coord.y.saturating_sub(1) },
            Direction::Left => Coord { x: coord.x.saturating_sub(1), y: coord.y },
            Direction::Right => Coord { x: coord.x.saturating_add(1), y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

/// Body of the `/move` response
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: Direction,
    pub shout: String,
}
