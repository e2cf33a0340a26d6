use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use rand::Rng;
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use snekgrid::config::{
    ConfigError, GameConfig, DEFAULT_FOOD_REWARD, DEFAULT_GRID_SIZE, DEFAULT_INITIAL_LENGTH,
    DEFAULT_SWIPE_THRESHOLD,
};
use snekgrid::input::{map_key, KeyAction, SwipeTracker};
use snekgrid::scheduler::GameLoop;
use snekgrid::ui::TerminalView;

/// How long to wait for input while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "snekgrid", version, about = "Fixed-tick snake for the terminal")]
struct Cli {
    /// Cells per side of the board
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 150)]
    tick_ms: u64,

    /// Segments the snake starts with
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: u16,

    /// Pixels a mouse drag must exceed to count as a swipe
    #[arg(long, default_value_t = DEFAULT_SWIPE_THRESHOLD)]
    swipe_threshold: u16,

    /// File the log is written to
    #[arg(long, default_value = "snekgrid.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, ConfigError> {
        GameConfig {
            grid_size: self.grid_size,
            tick: Duration::from_millis(self.tick_ms),
            initial_length: self.initial_length,
            food_reward: DEFAULT_FOOD_REWARD,
            swipe_threshold: self.swipe_threshold,
        }
        .validate()
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)
        .map_err(io::Error::other)?;

    info!("Starting snekgrid");

    let config = match cli.game_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Rejected configuration: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut view = TerminalView::new(terminal, config.grid_size);

    let swipe = SwipeTracker::new(config.swipe_threshold);
    let mut game = GameLoop::new(config, rand::thread_rng());
    let result = run(&mut view, &mut game, swipe);
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        view.terminal_mut().backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    view.terminal_mut().show_cursor()?;

    info!("Quit with score {}", game.session().score());
    result
}

fn run<B: Backend, R: Rng>(
    view: &mut TerminalView<B>,
    game: &mut GameLoop<R>,
    mut swipe: SwipeTracker,
) -> io::Result<()> {
    game.start(Instant::now(), view)?;

    loop {
        let timeout = game
            .ticker()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    KeyAction::Steer(dir) => {
                        game.request_direction(dir);
                    }
                    KeyAction::Restart => game.restart(Instant::now(), view)?,
                    KeyAction::PlayAgain if game.session().is_over() => {
                        game.restart(Instant::now(), view)?
                    }
                    KeyAction::Quit => break,
                    KeyAction::PlayAgain | KeyAction::None => {}
                },
                Event::Mouse(mouse) => {
                    let (x, y) = view.to_swipe_point(mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => swipe.begin(x, y),
                        MouseEventKind::Drag(MouseButton::Left) => swipe.track(x, y),
                        MouseEventKind::Up(MouseButton::Left) => {
                            if let Some(dir) = swipe.end(x, y) {
                                game.request_direction(dir);
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(..) => view.redraw()?,
                _ => {}
            }
        }

        game.poll(Instant::now(), view)?;
    }

    Ok(())
}
