use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_GRID_SIZE: u16 = 20;
pub const DEFAULT_TICK: Duration = Duration::from_millis(150);
pub const DEFAULT_INITIAL_LENGTH: u16 = 3;
pub const DEFAULT_FOOD_REWARD: u32 = 10;
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 10;

/// Largest board the terminal front-end is expected to draw.
pub const MAX_GRID_SIZE: u16 = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be between 2 and {max}, got {0}", max = MAX_GRID_SIZE)]
    GridSize(u16),
    #[error("tick period must be greater than zero")]
    ZeroTick,
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("a snake of length {length} does not fit left of the centre of a {grid_size}x{grid_size} grid")]
    SnakeTooLong { length: u16, grid_size: u16 },
}

/// Knobs for a game. Every session of a run shares the same config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Cells per side of the square board
    pub grid_size: u16,
    /// Time between simulation ticks
    pub tick: Duration,
    /// Segments the snake starts with
    pub initial_length: u16,
    /// Score added per food eaten
    pub food_reward: u32,
    /// Distance a swipe must exceed on its dominant axis
    pub swipe_threshold: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            tick: DEFAULT_TICK,
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_reward: DEFAULT_FOOD_REWARD,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(grid_size: u16) -> Self {
        GameConfig {
            grid_size,
            ..Default::default()
        }
    }

    /// Checks the config can produce a live starting session.
    ///
    /// The snake starts at the centre heading right, so its tail extends
    /// towards column zero and must stay on the board.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.initial_length > self.grid_size / 2 + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                grid_size: self.grid_size,
            });
        }
        Ok(self)
    }
}
