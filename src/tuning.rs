//! Data-driven game balance
//!
//! Reference values ship as defaults; a JSON file can override any subset
//! of them. An unreadable file falls back to defaults - balance is never a
//! reason to fail a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Paddle movement per tick while a direction is held
    pub paddle_speed: f32,
    /// One bonus ball per this many destroyed blocks, on average
    pub bonus_ball_chance: u32,
    /// Block grid shape
    pub block_rows: u32,
    pub block_cols: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: 8.0,
            bonus_ball_chance: 5,
            block_rows: 4,
            block_cols: 10,
        }
    }
}

impl Tuning {
    /// Load overrides from a JSON file, falling back to defaults on any
    /// read or parse failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("tuning loaded from {path:?}");
                    tuning
                }
                Err(err) => {
                    log::warn!("bad tuning file {path:?}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.paddle_speed, 8.0);
        assert_eq!(tuning.bonus_ball_chance, 5);
        assert_eq!(tuning.block_rows, 4);
        assert_eq!(tuning.block_cols, 10);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tuning = Tuning::load("/nonexistent/tuning.json");
        assert_eq!(tuning.paddle_speed, Tuning::default().paddle_speed);
    }

    #[test]
    fn test_partial_override() {
        let parsed: Tuning = serde_json::from_str(r#"{"block_rows": 6}"#).unwrap();
        assert_eq!(parsed.block_rows, 6);
        assert_eq!(parsed.block_cols, 10);
    }
}
