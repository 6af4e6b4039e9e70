//! Host configuration.
//!
//! Every setting has a default, can be overridden by a `SNAKE_*` environment
//! variable, and then by a command-line flag.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::LevelFilter;

use crate::core::{JsonFileBackend, KvBackend, ScoreStore};
use crate::types::TICK_MS;

pub const DEFAULT_SCORE_PATH: &str = ".tui_snake_high_score.json";
pub const DEFAULT_LOG_PATH: &str = "tui-snake.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "tui-snake")]
#[command(version, about = "Snake in the terminal")]
pub struct SnakeConfig {
    /// Milliseconds between snake moves
    #[arg(long, env = "SNAKE_TICK_MS", default_value_t = TICK_MS as u64)]
    pub tick_ms: u64,

    /// Food placement seed (derived from the clock when omitted)
    #[arg(long, env = "SNAKE_SEED")]
    pub seed: Option<u32>,

    /// File holding the persisted high score
    #[arg(long = "score-file", env = "SNAKE_SCORE_PATH", default_value = DEFAULT_SCORE_PATH)]
    pub score_path: PathBuf,

    /// Keep the high score in memory only
    #[arg(long, env = "SNAKE_NO_PERSIST")]
    pub no_persist: bool,

    /// Log file (the terminal itself is the game screen)
    #[arg(long = "log-file", env = "SNAKE_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "SNAKE_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Enable mouse drags for steering and a clickable restart button
    #[arg(long, env = "SNAKE_POINTER")]
    pub pointer: bool,

    /// Clear the stored high score and exit
    #[arg(long)]
    pub reset_high_score: bool,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS as u64,
            seed: None,
            score_path: PathBuf::from(DEFAULT_SCORE_PATH),
            no_persist: false,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_level: LevelFilter::Info,
            pointer: false,
            reset_high_score: false,
        }
    }
}

impl SnakeConfig {
    /// Defaults, then environment, then process arguments.
    pub fn load() -> Self {
        Self::parse()
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    pub fn score_backend(&self) -> Option<Box<dyn KvBackend>> {
        if self.no_persist {
            None
        } else {
            Some(Box::new(JsonFileBackend::new(self.score_path.clone())))
        }
    }

    /// Score store backed by the configured medium.
    pub fn score_store(&self) -> ScoreStore {
        ScoreStore::new(self.score_backend())
    }
}
