pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
#[cfg(test)]
mod test_support;
pub mod ui;
