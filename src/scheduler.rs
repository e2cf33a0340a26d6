use std::io;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::grid::{Direction, Pos};
use crate::session::{GameSession, StepResult};
use crate::snake::Snake;

/// Where the game loop sends what it wants shown.
pub trait GameView {
    fn render(&mut self, snake: &Snake, food: Pos) -> io::Result<()>;
    fn set_score(&mut self, score: u32) -> io::Result<()>;
    fn show_game_over(&mut self, final_score: u32) -> io::Result<()>;
    fn hide_game_over_overlay(&mut self) -> io::Result<()>;
}

/// A repeating timer with at most one pending deadline.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker {
            period,
            next_due: None,
        }
    }

    /// Schedules the first firing one period from `now`, replacing any
    /// deadline already set.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consumes the current deadline if it has passed and schedules the next.
    ///
    /// A loop that fell behind fires once and re-anchors on `now` rather than
    /// replaying every missed period.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Owns the running session and drives it from the ticker.
pub struct GameLoop<R: Rng> {
    config: GameConfig,
    session: GameSession,
    ticker: Ticker,
    rng: R,
}

impl<R: Rng> GameLoop<R> {
    /// Builds the loop with a fresh session. Nothing is shown and the timer
    /// is not armed until [`GameLoop::start`].
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let session = GameSession::new(&config, &mut rng);
        let ticker = Ticker::new(config.tick);
        GameLoop {
            config,
            session,
            ticker,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn start(&mut self, now: Instant, view: &mut impl GameView) -> io::Result<()> {
        self.ticker.cancel();
        view.set_score(self.session.score())?;
        view.hide_game_over_overlay()?;
        view.render(self.session.snake(), self.session.food())?;
        if self.session.is_over() {
            view.show_game_over(self.session.score())?;
        } else {
            self.ticker.arm(now);
        }
        info!("Session started on a {0}x{0} grid", self.config.grid_size);
        Ok(())
    }

    /// Throws the current session away and starts a fresh one.
    pub fn restart(&mut self, now: Instant, view: &mut impl GameView) -> io::Result<()> {
        self.ticker.cancel();
        self.session = GameSession::new(&self.config, &mut self.rng);
        self.start(now, view)
    }

    pub fn request_direction(&mut self, dir: Direction) -> bool {
        if self.session.is_over() {
            return false;
        }
        self.session.request_direction(dir)
    }

    /// Runs a tick if the timer says one is due.
    pub fn poll(&mut self, now: Instant, view: &mut impl GameView) -> io::Result<Option<StepResult>> {
        if self.ticker.fire_if_due(now) {
            self.tick(view)
        } else {
            Ok(None)
        }
    }

    /// Runs one simulation step and pushes the result to `view`.
    ///
    /// Returns `None` if the session has already ended.
    pub fn tick(&mut self, view: &mut impl GameView) -> io::Result<Option<StepResult>> {
        if self.session.is_over() {
            return Ok(None);
        }

        let result = self.session.step(&mut self.rng);
        view.render(self.session.snake(), self.session.food())?;

        match result {
            StepResult::Nommed { score } => view.set_score(score)?,
            StepResult::GameOver(_) => {
                self.ticker.cancel();
                // Eating the last free cell scores and ends the game in one step
                view.set_score(self.session.score())?;
                view.show_game_over(self.session.score())?;
            }
            StepResult::Continue => {}
        }

        Ok(Some(result))
    }
}
