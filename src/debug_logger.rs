// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state is written to a JSONL file
// that the replay tool can read back, along with the turn's RNG seed.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::selector::Decision;
use crate::types::{Board, Direction};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    game_id: String,
    turn: i32,
    you_id: String,
    seed: u64,
    chosen_move: Direction,
    shout: String,
    board: Board,
    timestamp: String,
}

impl DebugLogEntry {
    fn new(
        game_id: &str,
        turn: i32,
        you_id: &str,
        seed: u64,
        board: Board,
        decision: &Decision,
    ) -> Self {
        DebugLogEntry {
            game_id: game_id.to_string(),
            turn,
            you_id: you_id.to_string(),
            seed,
            chosen_move: decision.direction,
            shout: decision.shout.clone(),
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(
        &self,
        game_id: &str,
        turn: i32,
        you_id: &str,
        seed: u64,
        board: Board,
        decision: &Decision,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry::new(game_id, turn, you_id, seed, board, decision);
        let file_handle = self.file.clone();

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Appends one entry; waits for the write so tests can read the file back
    pub async fn log_move_now(
        &self,
        game_id: &str,
        turn: i32,
        you_id: &str,
        seed: u64,
        board: Board,
        decision: &Decision,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry::new(game_id, turn, you_id, seed, board, decision);
        Self::write_entry(self.file.clone(), entry).await;
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
