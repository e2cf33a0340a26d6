//! A fixed-tick snake game: the grid simulation, its input rules and the
//! loop that drives it, plus a ratatui front-end.

pub mod config;
pub mod food;
pub mod grid;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod snake;
pub mod ui;
