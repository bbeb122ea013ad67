// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub selector: SelectorConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Response-time budget for a single `/move` call
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Scoring rule used to pick among surviving moves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Corner-avoidance scoring, lowest score wins
    CenterBias,
    /// Uniform choice among survivors
    Random,
}

/// Move selector constants
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    pub heuristic: Heuristic,
    pub corner_avoidance_bonus: i32,
    /// Returned when nothing survives the filter, and when a turn overruns its budget
    pub fallback_move: Direction,
    pub no_moves_shout: String,
    /// Fixed RNG seed; seeded from the OS when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Metadata reported on `GET /`
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            selector: SelectorConfig {
                heuristic: Heuristic::CenterBias,
                corner_avoidance_bonus: 2,
                fallback_move: Direction::Down,
                no_moves_shout: "I HAVE NO MOVES LEFT!!!".to_string(),
                seed: None,
            },
            appearance: AppearanceConfig {
                author: "aledega".to_string(),
                color: "#3366ff".to_string(),
                head: "caffeine".to_string(),
                tail: "coffee".to_string(),
                version: "0.0.1-beta".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_budget_calculation() {
        let config = Config::default_hardcoded();
        assert_eq!(config.timing.effective_budget_ms(), 350);
    }

    #[test]
    fn test_effective_budget_never_underflows() {
        let timing = TimingConfig {
            response_time_budget_ms: 10,
            network_overhead_ms: 50,
        };
        assert_eq!(timing.effective_budget_ms(), 0);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(
            file_config.timing.response_time_budget_ms,
            hardcoded_config.timing.response_time_budget_ms
        );
        assert_eq!(
            file_config.timing.network_overhead_ms,
            hardcoded_config.timing.network_overhead_ms
        );
        assert_eq!(
            file_config.selector.heuristic,
            hardcoded_config.selector.heuristic
        );
        assert_eq!(
            file_config.selector.corner_avoidance_bonus,
            hardcoded_config.selector.corner_avoidance_bonus
        );
        assert_eq!(
            file_config.selector.fallback_move,
            hardcoded_config.selector.fallback_move
        );
        assert_eq!(
            file_config.selector.no_moves_shout,
            hardcoded_config.selector.no_moves_shout
        );
        assert_eq!(file_config.selector.seed, hardcoded_config.selector.seed);
        assert_eq!(
            file_config.appearance.color,
            hardcoded_config.appearance.color
        );
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
    }

    #[test]
    fn test_random_heuristic_and_seed_parse() {
        let toml = r##"
            [timing]
            response_time_budget_ms = 500
            network_overhead_ms = 100

            [selector]
            heuristic = "random"
            corner_avoidance_bonus = 2
            fallback_move = "up"
            no_moves_shout = "bye"
            seed = 42

            [appearance]
            author = "a"
            color = "#000000"
            head = "default"
            tail = "default"
            version = "1"

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
        "##;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.selector.heuristic, Heuristic::Random);
        assert_eq!(config.selector.fallback_move, Direction::Up);
        assert_eq!(config.selector.seed, Some(42));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        assert!(matches!(
            Config::from_file("nonexistent.toml"),
            Err(ConfigError::Read { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[timing]\nresponse_time_budget_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
