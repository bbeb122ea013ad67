// Error types for configuration loading and log replay.
//
// The move engine itself never fails; these only cover the edges that touch
// the filesystem or user input.

use std::io;
use std::path::PathBuf;

/// Raised when a direction string is not one of up/down/left/right
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: '{0}'")]
pub struct ParseDirectionError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to open log file: {0}")]
    Open(#[source] io::Error),

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("snake with id '{0}' not found in board state")]
    SnakeNotFound(String),

    #[error("turn {0} not found in log file")]
    TurnNotFound(i32),

    #[error(transparent)]
    Direction(#[from] ParseDirectionError),

    #[error("turn {turn}: expected one of {expected:?}, but got {actual}")]
    Unexpected {
        turn: i32,
        expected: Vec<String>,
        actual: String,
    },
}
