use std::time::Instant;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::grid::{Cell, Grid};
use crate::keys::LogicalKey;
use crate::render;
use crate::term::TermManager;
use crate::snake::{Snake, Direction, MoveResult::{self, *}};
use crate::{Coords, TermInt};

use anyhow::Context;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

const MIN_ROWS: TermInt = 8;
const MIN_COLS: TermInt = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Terminated,
}

#[derive(Debug)]
pub struct GameState {
    score: u64,
    phase: Phase,
}

impl GameState {
    fn new() -> Self {
        GameState { score: 0, phase: Phase::Running }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Terminated
    }

    fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Terminated => Phase::Terminated,
        };
    }

    fn quit(&mut self) {
        self.phase = Phase::Terminated;
    }
}

/// Everything one game owns: the field, the snake laid on it, the food and
/// the score. Created once per run and dropped with it.
pub struct GameContext {
    grid: Grid,
    snake: Snake,
    food: Option<Coords>,
    state: GameState,
    rng: StdRng,
}

impl GameContext {
    pub fn new(rows: TermInt, cols: TermInt, config: &GameConfig, rng: StdRng) -> Result<Self> {
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(GameError::TerminalTooSmall { rows, cols });
        }

        let mut grid = Grid::new(rows, cols)?;
        let center = (rows / 2, cols / 2);
        let snake = Snake::new(&mut grid, center, config.initial_length, Direction::Up)?;

        let mut ctx = GameContext { grid, snake, food: None, state: GameState::new(), rng };
        ctx.food = ctx.spawn_food(None);
        Ok(ctx)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies one key. Directions are taken even while paused and only
    /// acted on by the next unpaused tick.
    pub fn handle_key(&mut self, key: LogicalKey) {
        match key {
            LogicalKey::Quit => {
                info!("quit requested");
                self.state.quit();
            }
            LogicalKey::Pause => {
                self.state.toggle_pause();
                info!("phase is now {:?}", self.state.phase());
            }
            LogicalKey::Other => {}
            dir_key => {
                if let Some(dir) = dir_key.direction() {
                    self.snake.set_direction(dir);
                }
            }
        }
    }

    /// Advances the game by one tick. Returns `None` when not running.
    pub fn tick(&mut self) -> Result<Option<MoveResult>> {
        if self.state.phase() != Phase::Running {
            return Ok(None);
        }

        let next = match self.snake.prospective_head(&self.grid) {
            Some(next) => next,
            None => {
                debug!("step {:?} from {:?} blocked", self.snake.get_direction(), self.snake.head());
                return Ok(Some(Blocked));
            }
        };

        if self.grid.at(next) == Cell::Food {
            self.state.score += 1;
            self.grid.put(next, Cell::Empty);
            self.food = self.spawn_food(Some(next));
            self.snake.grow();
            debug!("food eaten at {:?}, score {}", next, self.state.score);
        }

        self.snake.advance(&mut self.grid, next).map(Some)
    }

    /// Puts food on a random free interior cell, redrawing until one is free.
    /// `reserved` is kept clear: the head is about to move there.
    fn spawn_food(&mut self, reserved: Option<Coords>) -> Option<Coords> {
        let free = self
            .grid
            .interior_size()
            .saturating_sub(self.snake.length() + reserved.is_some() as usize);
        if free == 0 {
            warn!("no free cell left for food");
            return None;
        }

        let (rows, cols) = self.grid.dimensions();
        loop {
            let pos = (self.rng.gen_range(2..rows - 2), self.rng.gen_range(1..cols - 1));
            if Some(pos) != reserved && self.grid.at(pos) == Cell::Empty {
                self.grid.put(pos, Cell::Food);
                return Some(pos);
            }
        }
    }
}

pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        SnakeGame { config, term: TermManager::new() }
    }

    /// Runs one game until the player quits. The terminal is restored on
    /// every way out of here.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.term.setup()?;
        let result = self.play();
        let restored = self.term.restore();
        result.and(restored)
    }

    fn play(&mut self) -> anyhow::Result<()> {
        let (rows, cols) = self.term.get_terminal_size()?;
        let mut ctx = GameContext::new(rows, cols, &self.config, StdRng::from_entropy())
            .context("Error starting the game")?;
        info!("playing on a {}x{} grid, tick {:?}", rows, cols, self.config.tick);

        self.draw(&ctx)?;
        let mut deadline = Instant::now() + self.config.tick;

        while ctx.state().is_running() {
            let timeout = deadline.saturating_duration_since(Instant::now());

            if let Some(key) = self.term.read_key(timeout)? {
                ctx.handle_key(key);
                if !ctx.state().is_running() {
                    break;
                }
                if key != LogicalKey::Other {
                    self.draw(&ctx)?;
                }
            }

            if Instant::now() >= deadline {
                deadline = Instant::now() + self.config.tick;
                ctx.tick().context("Error moving the snake")?;
                self.draw(&ctx)?;
            }
        }

        info!("game over, score {}", ctx.state().score());
        Ok(())
    }

    fn draw(&mut self, ctx: &GameContext) -> anyhow::Result<()> {
        let frame = render::frame(ctx).context("Error building frame")?;
        self.term.write_frame(frame)
    }
}
