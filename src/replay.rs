// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the decision engine on historical states
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::error::ReplayError;
use crate::selector::turn_seed;
use crate::types::{Board, Direction};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    #[serde(default)]
    pub game_id: String,
    pub turn: i32,
    /// Older logs have no id; the first snake on the board is assumed
    #[serde(default)]
    pub you_id: Option<String>,
    /// Per-turn RNG seed the server used; derived from the config when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub chosen_move: String,
    #[serde(default)]
    pub shout: String,
    pub board: Board,
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub replayed_shout: String,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, ReplayError> {
        let file = File::open(log_path.as_ref()).map_err(ReplayError::Open)?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ReplayError::Read {
                line: line_num + 1,
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|source| ReplayError::Json {
                line: line_num + 1,
                source,
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs the decision engine on a single board state for the given snake
    pub fn replay_turn(
        &self,
        board: &Board,
        our_snake_id: &str,
        seed: u64,
    ) -> Result<(Direction, String, u128), ReplayError> {
        let our_snake = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| ReplayError::SnakeNotFound(our_snake_id.to_string()))?;

        let start_time = Instant::now();

        let mut rng = StdRng::seed_from_u64(seed);
        let decision = Bot::compute_move(board, our_snake, &self.config.selector, &mut rng);

        Ok((
            decision.direction,
            decision.shout,
            start_time.elapsed().as_micros(),
        ))
    }

    /// The logged seed when present, otherwise what the server derives from `selector.seed`
    pub fn seed_for(&self, entry: &LogEntry) -> u64 {
        entry
            .seed
            .unwrap_or_else(|| turn_seed(self.config.selector.seed.unwrap_or(0), entry.turn))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, ReplayError> {
        let our_snake_id = match &entry.you_id {
            Some(id) => id.clone(),
            None => entry
                .board
                .snakes
                .first()
                .map(|s| s.id.clone())
                .ok_or_else(|| ReplayError::SnakeNotFound("<first snake>".to_string()))?,
        };

        let original_move: Direction = entry.chosen_move.parse()?;
        let seed = self.seed_for(entry);
        let (replayed_move, replayed_shout, computation_time) =
            self.replay_turn(&entry.board, &our_snake_id, seed)?;

        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({}µs)",
                    entry.turn, replayed_move, computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} ({}µs)",
                    entry.turn, original_move, replayed_move, computation_time
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            replayed_shout,
            matches,
            computation_time_us: computation_time,
        })
    }

    /// Replays all entries in parallel, skipping those that cannot be replayed.
    /// Results keep the order of `entries`.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, ReplayError> {
        let selected = turn_numbers
            .iter()
            .map(|turn_num| {
                entries
                    .iter()
                    .find(|e| e.turn == *turn_num)
                    .cloned()
                    .ok_or(ReplayError::TurnNotFound(*turn_num))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.replay_all(&selected))
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}µs\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} ({}µs)",
                    result.turn, result.original_move, result.replayed_move, result.computation_time_us
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), ReplayError> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or(ReplayError::TurnNotFound(*turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(ReplayError::Unexpected {
                    turn: *turn,
                    expected: acceptable.iter().map(|d| d.to_string()).collect(),
                    actual: actual_move.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(turn: i32, chosen_move: &str) -> LogEntry {
        LogEntry {
            game_id: "g".to_string(),
            turn,
            you_id: None,
            seed: None,
            chosen_move: chosen_move.to_string(),
            shout: String::new(),
            board: Board {
                width: 11,
                height: 11,
                food: vec![],
                snakes: vec![],
                hazards: vec![],
            },
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_generate_stats() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let make = |matches| ReplayResult {
            turn: 0,
            original_move: Direction::Up,
            replayed_move: Direction::Up,
            replayed_shout: String::new(),
            matches,
            computation_time_us: 1,
        };
        let stats = engine.generate_stats(&[make(true), make(true), make(false), make(true)]);
        assert_eq!(stats.total_turns, 4);
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.mismatches, 1);
        assert!((stats.match_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let stats = engine.generate_stats(&[]);
        assert_eq!(stats.total_turns, 0);
        assert_eq!(stats.match_rate, 0.0);
    }

    #[test]
    fn test_validate_expected_moves() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(0, "up"), entry(1, "left")];

        assert!(engine
            .validate_expected_moves(&entries, &[(0, vec![Direction::Up])])
            .is_ok());
        assert!(engine
            .validate_expected_moves(&entries, &[(1, vec![Direction::Up, Direction::Left])])
            .is_ok());
        assert!(matches!(
            engine.validate_expected_moves(&entries, &[(1, vec![Direction::Right])]),
            Err(ReplayError::Unexpected { turn: 1, .. })
        ));
        assert!(matches!(
            engine.validate_expected_moves(&entries, &[(9, vec![Direction::Up])]),
            Err(ReplayError::TurnNotFound(9))
        ));
    }

    #[test]
    fn test_replay_entry_without_snakes_fails() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        assert!(matches!(
            engine.replay_entry(&entry(0, "up")),
            Err(ReplayError::SnakeNotFound(_))
        ));
    }
}
