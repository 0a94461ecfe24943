use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::action::Direction;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square arena, in arena units
    pub arena_size: i32,
    /// Side length of one cell; the snake moves one cell per tick
    pub cell_size: i32,
    /// Starting segments, head first
    pub initial_snake: Vec<Position>,
    /// Heading before any input arrives
    pub initial_direction: Direction,
    /// Where the first food item sits
    pub initial_food: Position,

    // Speed ramp
    /// Tick interval at start, in milliseconds
    pub initial_interval_ms: u64,
    /// How much each food item shortens the interval
    pub interval_step_ms: u64,
    /// The interval never drops below this
    pub min_interval_ms: u64,

    /// Points per food item
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_size: 600,
            cell_size: 20,
            initial_snake: vec![
                Position::new(160, 200),
                Position::new(140, 200),
                Position::new(120, 200),
            ],
            initial_direction: Direction::Right,
            initial_food: Position::new(300, 200),
            initial_interval_ms: 200,
            interval_step_ms: 10,
            min_interval_ms: 50,
            food_score: 10,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom arena, keeping the default
    /// starting layout
    pub fn new(arena_size: i32, cell_size: i32) -> Self {
        Self {
            arena_size,
            cell_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Number of cells along one side of the arena
    pub fn cells_per_side(&self) -> i32 {
        self.arena_size / self.cell_size
    }

    fn is_on_grid(&self, pos: Position) -> bool {
        pos.is_on_lattice(self.cell_size) && pos.is_within_arena(self.arena_size, self.cell_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size <= 0 {
            return Err(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            ));
        }

        if self.arena_size <= 0 || self.arena_size % self.cell_size != 0 {
            return Err(format!(
                "arena_size ({}) must be a positive multiple of cell_size ({})",
                self.arena_size, self.cell_size
            ));
        }

        if self.initial_snake.len() < 3 {
            return Err(format!(
                "initial_snake needs at least 3 segments, got {}",
                self.initial_snake.len()
            ));
        }

        for (i, segment) in self.initial_snake.iter().enumerate() {
            if !self.is_on_grid(*segment) {
                return Err(format!(
                    "initial_snake segment {} at ({}, {}) is off the grid",
                    i, segment.x, segment.y
                ));
            }
        }

        for (i, pair) in self.initial_snake.windows(2).enumerate() {
            let distance = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            if distance != self.cell_size {
                return Err(format!(
                    "initial_snake segments {} and {} are not adjacent",
                    i,
                    i + 1
                ));
            }
        }

        for (i, segment) in self.initial_snake.iter().enumerate() {
            if self.initial_snake[..i].contains(segment) {
                return Err(format!("initial_snake segment {} overlaps the body", i));
            }
        }

        let (dx, dy) = self.initial_direction.delta();
        let neck = self.initial_snake[1];
        let head = self.initial_snake[0];
        if neck == head.moved_by(dx * self.cell_size, dy * self.cell_size) {
            return Err("initial_direction points into the snake's own neck".to_string());
        }

        if !self.is_on_grid(self.initial_food) {
            return Err(format!(
                "initial_food at ({}, {}) is off the grid",
                self.initial_food.x, self.initial_food.y
            ));
        }

        if self.initial_snake.contains(&self.initial_food) {
            return Err("initial_food cannot sit on the snake".to_string());
        }

        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be at least 1".to_string());
        }

        if self.initial_interval_ms < self.min_interval_ms {
            return Err(format!(
                "initial_interval_ms ({}) cannot be below min_interval_ms ({})",
                self.initial_interval_ms, self.min_interval_ms
            ));
        }

        if self.interval_step_ms == 0 {
            return Err("interval_step_ms must be at least 1".to_string());
        }

        Ok(())
    }
}
