//! Grid Snake - a snake simulation on a fixed-size grid
//!
//! This library provides:
//! - Core simulation: movement, growth, food placement, collisions and the
//!   speed ramp, driven by caller-supplied time (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session timing (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
