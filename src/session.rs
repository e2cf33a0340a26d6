use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::food::place_food;
use crate::grid::{Direction, Grid, Pos};
use crate::input::propose_direction;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// Head left the board
    Wall,
    /// Head ran into a segment of its own body
    SelfCollision,
    /// Snake covers every cell so there is nowhere left for food
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Moved one cell, nothing eaten
    Continue,
    /// Moved, ate, and grew; carries the new score
    Nommed { score: u32 },
    GameOver(GameOverCause),
}

impl StepResult {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepResult::GameOver(_))
    }
}

/// One play from the first tick to game over.
#[derive(Clone, Debug)]
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    food: Pos,
    active: Direction,
    pending: Direction,
    score: u32,
    food_reward: u32,
    over: Option<GameOverCause>,
}

impl GameSession {
    /// Starts a session from `config`: snake centred and heading right, food
    /// somewhere free. `config` is expected to have been validated.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let grid = Grid::new(config.grid_size);
        let heading = Direction::Right;
        let snake = Snake::new(grid.center(), heading, config.initial_length);

        let mut session = GameSession {
            grid,
            snake,
            food: grid.center(),
            active: heading,
            pending: heading,
            score: 0,
            food_reward: config.food_reward,
            over: None,
        };
        match place_food(&session.snake, grid, rng) {
            Some(food) => session.food = food,
            None => session.over = Some(GameOverCause::BoardFilled),
        }
        session
    }

    /// Assembles a session from explicit parts, mostly for setting up a
    /// particular board.
    pub fn from_parts(
        grid: Grid,
        snake: Snake,
        food: Pos,
        heading: Direction,
        food_reward: u32,
    ) -> Self {
        GameSession {
            grid,
            snake,
            food,
            active: heading,
            pending: heading,
            score: 0,
            food_reward,
            over: None,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Pos {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active_direction(&self) -> Direction {
        self.active
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.over
    }

    /// Queues a turn for the next tick. Returns whether it was accepted.
    ///
    /// Checked against the direction of the last move, not the pending one,
    /// so two quick turns cannot add up to a reversal. The latest accepted
    /// request wins.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        match propose_direction(self.active, requested) {
            Some(dir) => {
                self.pending = dir;
                true
            }
            None => false,
        }
    }

    /// Advances the snake by one cell.
    ///
    /// Collisions are checked against the whole body before it moves, tail
    /// included. On game over the snake is left where it was.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepResult {
        if let Some(cause) = self.over {
            return StepResult::GameOver(cause);
        }

        self.active = self.pending;
        let new_head = self.snake.head().step(self.active);

        if !self.grid.is_valid(new_head) {
            return self.finish(GameOverCause::Wall);
        }
        if self.snake.occupies(new_head) {
            return self.finish(GameOverCause::SelfCollision);
        }

        self.snake.push_head(new_head);

        if new_head != self.food {
            self.snake.drop_tail();
            return StepResult::Continue;
        }

        self.score += self.food_reward;
        debug!("Nommed at {:?}, score {}", new_head, self.score);
        match place_food(&self.snake, self.grid, rng) {
            Some(food) => {
                self.food = food;
                StepResult::Nommed { score: self.score }
            }
            // Grown into the last free cell
            None => self.finish(GameOverCause::BoardFilled),
        }
    }

    fn finish(&mut self, cause: GameOverCause) -> StepResult {
        info!("Game over ({:?}) with score {}", cause, self.score);
        self.over = Some(cause);
        StepResult::GameOver(cause)
    }
}
