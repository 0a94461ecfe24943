use anyhow::{Result, anyhow};
use log::{debug, info, trace};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::{
    action::{Direction, request_heading},
    collision,
    config::GameConfig,
    food::FoodPlacer,
    state::{GameState, GameStatus, Position, Snake},
    timer::RepeatingTimer,
};

/// What the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Segments, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub interval_ms: u64,
}

/// Emitted once per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    StateUpdated(Snapshot),
    GameOver { final_score: u32 },
}

/// The simulation clock: owns the game state and the tick timer and runs
/// movement, feeding, speed-up and collision checks on every tick.
pub struct Simulation<R = ThreadRng> {
    config: GameConfig,
    state: GameState,
    timer: RepeatingTimer,
    food_placer: FoodPlacer<R>,
}

impl Simulation<ThreadRng> {
    /// Create a new simulation with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation that places food with the given generator.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid game configuration: {}", e))?;

        let snake = Snake::from_segments(config.initial_snake.clone(), config.initial_direction);
        let state = GameState::new(
            snake,
            config.initial_food,
            config.arena_size,
            config.cell_size,
            config.initial_interval_ms,
        );
        let food_placer = FoodPlacer::with_rng(config.arena_size, config.cell_size, rng);

        Ok(Self {
            config,
            state,
            timer: RepeatingTimer::new(),
            food_placer,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.state.snake.body.clone(),
            food: self.state.food,
            score: self.state.score,
            interval_ms: self.state.interval_ms,
        }
    }

    /// When the next tick is due, if the clock is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Start ticking. Only the first call does anything.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state.status != GameStatus::NotStarted {
            return false;
        }

        self.state.status = GameStatus::Running;
        self.timer.arm(now, Duration::from_millis(self.state.interval_ms));
        info!(
            "Simulation started: {}x{} cells, interval {}ms",
            self.state.cells_per_side(),
            self.state.cells_per_side(),
            self.state.interval_ms
        );
        true
    }

    /// Queue a heading for the next tick.
    ///
    /// The candidate is checked against the heading of the last tick, so a
    /// pair of quick turns cannot add up to a reversal. The latest accepted
    /// input wins.
    pub fn set_heading(&mut self, candidate: Direction) {
        if !self.state.is_running() {
            trace!("Ignoring heading {:?} while {:?}", candidate, self.state.status);
            return;
        }

        // Compared with the heading of the last tick rather than the pending
        // one: Right, then Up, then Left before a tick keeps Up instead of
        // letting the second turn reverse the snake.
        let current = self.state.snake.direction;
        let accepted = request_heading(candidate, current);
        if accepted != candidate {
            trace!("Rejected reversal from {:?} to {:?}", current, candidate);
            return;
        }
        self.state.pending_heading = Some(accepted);
    }

    /// Queue a heading given as a raw delta. Non-headings are dropped.
    pub fn set_heading_delta(&mut self, dx: i32, dy: i32) {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.set_heading(direction),
            None => trace!("Ignoring non-heading delta ({}, {})", dx, dy),
        }
    }

    /// Run every tick that is due at `now`, in order
    pub fn poll(&mut self, now: Instant) -> Vec<SimEvent> {
        let mut events = Vec::new();

        // game over cancels the timer, which ends the loop
        while let Some(fired_at) = self.timer.poll(now) {
            if let Some(event) = self.tick(fired_at) {
                events.push(event);
            }
        }

        events
    }

    /// Run one tick scheduled for `now`.
    ///
    /// Returns `None` unless the simulation is running.
    pub fn tick(&mut self, now: Instant) -> Option<SimEvent> {
        if !self.state.is_running() {
            return None;
        }

        let heading = self
            .state
            .pending_heading
            .take()
            .unwrap_or(self.state.snake.direction);

        self.state.snake.advance(heading, self.state.cell_size);
        self.state.ticks += 1;

        if self.state.snake.head() == self.state.food {
            self.state.snake.grow();
            self.state.score += self.config.food_score;
            self.state.food = self.food_placer.relocate(&self.state.snake);
            debug!(
                "Food eaten at tick {}: score {}, length {}, next food at ({}, {})",
                self.state.ticks,
                self.state.score,
                self.state.snake.len(),
                self.state.food.x,
                self.state.food.y
            );
            self.speed_up(now);
        } else {
            self.state.snake.shrink();
        }

        if let Some(collision) =
            collision::detect(&self.state.snake, self.state.arena_size, self.state.cell_size)
        {
            self.timer.cancel();
            self.state.status = GameStatus::Over;
            info!(
                "Game over after {} ticks ({:?}), final score {}",
                self.state.ticks, collision, self.state.score
            );
            return Some(SimEvent::GameOver {
                final_score: self.state.score,
            });
        }

        let head = self.state.snake.head();
        trace!("Tick {}: head at ({}, {})", self.state.ticks, head.x, head.y);
        Some(SimEvent::StateUpdated(self.snapshot()))
    }

    /// Stop a running simulation from outside. Cancels the timer before the
    /// state becomes `Over`; does nothing unless running.
    pub fn stop(&mut self) -> Option<SimEvent> {
        if !self.state.is_running() {
            return None;
        }

        self.timer.cancel();
        self.state.status = GameStatus::Over;
        info!("Simulation stopped, score {}", self.state.score);
        Some(SimEvent::GameOver {
            final_score: self.state.score,
        })
    }

    fn speed_up(&mut self, now: Instant) {
        let min = self.config.min_interval_ms;
        if self.state.interval_ms <= min {
            return;
        }

        let next = self
            .state
            .interval_ms
            .saturating_sub(self.config.interval_step_ms)
            .max(min);
        debug!("Interval {}ms -> {}ms", self.state.interval_ms, next);
        self.state.interval_ms = next;
        self.timer.arm(now, Duration::from_millis(next));
    }
}
