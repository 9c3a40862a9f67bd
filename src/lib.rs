//! A formation shooter: the player slides along the bottom edge and fires
//! at a grid of enemies that sweeps side to side, dropping a row each time
//! it hits a wall.  The game ends when the grid is destroyed or an enemy
//! crosses the breach line.
//!
//! The library holds the fixed-timestep engine and the input adapter; the
//! binary adds a crossterm renderer and the tick scheduler.

pub mod compute;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;

pub use config::GameConfig;
pub use engine::Engine;
pub use error::{ConfigError, GameError, Result};
