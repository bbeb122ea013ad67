// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all build on these

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod handler;
pub mod moves;
pub mod replay;
pub mod selector;
pub mod types;
