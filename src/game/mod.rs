//! Core simulation for grid snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time comes in from the caller, so the same code drives the terminal front end
//! and deterministic tests.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use action::{Direction, request_heading};
pub use collision::{CollisionType, is_terminal};
pub use config::GameConfig;
pub use engine::{SimEvent, Simulation, Snapshot};
pub use food::FoodPlacer;
pub use state::{GameState, GameStatus, Position, Snake};
pub use timer::RepeatingTimer;
