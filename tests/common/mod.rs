// Board builders shared by the integration tests

#![allow(dead_code)]

use centerline_snake::types::{Battlesnake, Board, Coord};

pub fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

pub fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 80,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

pub fn board(width: i32, height: i32, snakes: Vec<Battlesnake>, hazards: Vec<Coord>) -> Board {
    Board {
        width,
        height,
        food: vec![],
        snakes,
        hazards,
    }
}
