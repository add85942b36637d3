// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub timing: TimingConfig,
    pub selection: SelectionConfig,
    pub debug: DebugConfig,
}

/// Static identity returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Timing and performance constants
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

/// Move selection policy
#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    /// Move answered when every direction is fatal
    pub fallback: Direction,
    /// Equal area scores resolve to the earliest direction here
    pub tie_break_order: Vec<Direction>,
    pub parallel_scoring: bool,
}

impl SelectionConfig {
    /// Checks that the tie-break order names each direction exactly once
    pub fn validate(&self) -> Result<(), String> {
        if self.tie_break_order.len() != 4 {
            return Err(format!(
                "tie_break_order must list 4 directions, found {}",
                self.tie_break_order.len()
            ));
        }

        for dir in Direction::all().iter() {
            if !self.tie_break_order.contains(dir) {
                return Err(format!("tie_break_order is missing '{}'", dir.as_str()));
            }
        }

        Ok(())
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            fallback: Direction::Down,
            tie_break_order: Direction::all().to_vec(),
            parallel_scoring: true,
        }
    }
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
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed and validated configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;

        config
            .selection
            .validate()
            .map_err(|e| format!("Invalid [selection] section: {}", e))?;

        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "yusufmalikul".to_string(),
                color: "#0040ff".to_string(),
                head: "earmuffs".to_string(),
                tail: "bolt".to_string(),
            },
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            selection: SelectionConfig::default(),
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
