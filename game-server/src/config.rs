use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use game_core::{DwellTimings, GameSettings};
use game_types::Difficulty;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub default_difficulty: Difficulty,
    pub default_target_score: u32,
    pub win_dwell_ms: u64,
    pub loss_dwell_ms: u64,
    pub suggestion_count: usize,
    pub word_bank_file: Option<PathBuf>,
    pub connection_timeout_seconds: u64,
}

impl Config {
    /// Read settings from the environment, falling back to the defaults of a
    /// local hot-seat setup.
    pub fn from_env() -> Result<Self> {
        let max_mistakes: u32 = parse_var("DEFAULT_DIFFICULTY", 8)?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            default_difficulty: Difficulty::from_max_mistakes(max_mistakes),
            default_target_score: parse_var("DEFAULT_TARGET_SCORE", 5)?,
            win_dwell_ms: parse_var("WIN_DWELL_MS", 500)?,
            loss_dwell_ms: parse_var("LOSS_DWELL_MS", 1200)?,
            suggestion_count: parse_var("SUGGESTION_COUNT", 3)?,
            word_bank_file: env::var("WORD_BANK_FILE").ok().map(PathBuf::from),
            connection_timeout_seconds: parse_var("CONNECTION_TIMEOUT_SECONDS", 300)?,
        })
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            default_difficulty: self.default_difficulty,
            default_target_score: self.default_target_score.max(1),
            dwell: DwellTimings::new(
                Duration::from_millis(self.win_dwell_ms),
                Duration::from_millis(self.loss_dwell_ms),
            ),
            suggestion_count: self.suggestion_count,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_difficulty: Difficulty::Medium,
            default_target_score: 5,
            win_dwell_ms: 500,
            loss_dwell_ms: 1200,
            suggestion_count: 3,
            word_bank_file: None,
            connection_timeout_seconds: 300,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}
