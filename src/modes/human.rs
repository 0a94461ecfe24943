use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{GameConfig, GameStatus, SimEvent, Simulation, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, View};

pub struct HumanMode<R = rand::rngs::ThreadRng> {
    simulation: Simulation<R>,
    snapshot: Snapshot,
    status: GameStatus,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::with_simulation(Simulation::new(config)?))
    }
}

impl<R: rand::Rng> HumanMode<R> {
    pub fn with_simulation(simulation: Simulation<R>) -> Self {
        let snapshot = simulation.snapshot();

        Self {
            simulation,
            snapshot,
            status: GameStatus::NotStarted,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let deadline = self.simulation.next_deadline();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => warn!("Terminal event error: {}", e),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, at whatever interval the simulation is on
                _ = sleep_until(deadline) => {
                    let events = self.simulation.poll(Instant::now());
                    self.apply_events(events);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let view = View {
                        status: self.status,
                        snapshot: &self.snapshot,
                        arena_size: self.simulation.config().arena_size,
                        cell_size: self.simulation.config().cell_size,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        if let Some(event) = self.simulation.stop() {
            self.apply_events(vec![event]);
        }
        info!("Leaving after final score {}", self.snapshot.score);

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.simulation.set_heading(direction);
                }
                KeyAction::Start => {
                    if self.simulation.start(Instant::now()) {
                        self.status = GameStatus::Running;
                        self.metrics.on_game_start();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply_events(&mut self, events: Vec<SimEvent>) {
        for event in events {
            match event {
                SimEvent::StateUpdated(snapshot) => {
                    self.snapshot = snapshot;
                }
                SimEvent::GameOver { final_score } => {
                    self.snapshot.score = final_score;
                    self.status = GameStatus::Over;
                    self.metrics.on_game_over(final_score);
                }
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Sleep until the next tick, or forever while the clock is idle
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => futures::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mode() -> HumanMode<StdRng> {
        HumanMode::with_simulation(Simulation::with_rng(
            GameConfig::default(),
            StdRng::seed_from_u64(3),
        )
        .unwrap())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.status, GameStatus::NotStarted);
        assert_eq!(mode.snapshot.score, 0);
        assert_eq!(mode.snapshot.food, Position::new(300, 200));
    }

    #[test]
    fn test_start_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));

        assert_eq!(mode.status, GameStatus::Running);
        assert_eq!(mode.simulation.status(), GameStatus::Running);
        assert!(mode.simulation.next_deadline().is_some());
    }

    #[test]
    fn test_turn_key_reaches_simulation() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Up));

        let deadline = mode.simulation.next_deadline().unwrap();
        let events = mode.simulation.poll(deadline);
        mode.apply_events(events);

        assert_eq!(mode.snapshot.snake[0], Position::new(160, 180));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_quit_before_start_reports_no_game_over() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));

        assert_eq!(mode.simulation.stop(), None);
        assert_eq!(mode.status, GameStatus::NotStarted);
        assert_eq!(mode.metrics.final_score, None);
    }

    #[test]
    fn test_game_over_event() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.apply_events(vec![SimEvent::GameOver { final_score: 20 }]);

        assert_eq!(mode.status, GameStatus::Over);
        assert_eq!(mode.snapshot.score, 20);
        assert_eq!(mode.metrics.final_score, Some(20));
    }
}
