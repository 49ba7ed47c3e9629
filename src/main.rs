mod config;
mod error;
mod game;
mod grid;
mod keys;
mod render;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::config::GameConfig;

pub type TermInt = u16;
/// `(row, col)` on the screen.
pub type Coords = (TermInt, TermInt);

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let mut game = game::SnakeGame::new(config);
    let result = game.run();

    // The terminal is back to normal here, so errors can be reported.
    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    result
}

/// Stdout and stderr belong to the game screen, so records only go to a file.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Error creating log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    log::debug!("logging to {}", path.display());
    Ok(())
}
