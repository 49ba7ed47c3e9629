use std::{env, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};

pub const DEFAULT_TICK_MS: u64 = 150;
pub const DEFAULT_INITIAL_LENGTH: usize = 2;

const TICK_VAR: &str = "SNAKE_TICK_MS";
const LENGTH_VAR: &str = "SNAKE_INITIAL_LENGTH";
const LOG_FILE_VAR: &str = "SNAKE_LOG_FILE";

/// Runtime settings. There are no command line flags; everything optional
/// comes from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Time between two movement steps.
    pub tick: Duration,
    pub initial_length: usize,
    /// Where log records go. No logger is installed without it.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            initial_length: DEFAULT_INITIAL_LENGTH,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = GameConfig::default();

        if let Some(raw) = lookup(TICK_VAR) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds, got {:?}", TICK_VAR, raw))?;
            if ms == 0 {
                bail!("{} must be greater than zero", TICK_VAR);
            }
            config.tick = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(LENGTH_VAR) {
            let length: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number, got {:?}", LENGTH_VAR, raw))?;
            if length < 2 {
                bail!("{} must be at least 2", LENGTH_VAR);
            }
            config.initial_length = length;
        }

        config.log_file = lookup(LOG_FILE_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
