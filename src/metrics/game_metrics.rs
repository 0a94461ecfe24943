use std::time::{Duration, Instant};

/// Wall-clock play time for the session
pub struct GameMetrics {
    started_at: Option<Instant>,
    pub elapsed_time: Duration,
    pub final_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: None,
            elapsed_time: Duration::ZERO,
            final_score: None,
        }
    }

    /// Refresh the elapsed time; frozen before start and after game over
    pub fn update(&mut self) {
        if let (Some(started_at), None) = (self.started_at, self.final_score) {
            self.elapsed_time = started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.final_score = Some(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_clock_idle_before_start() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();

        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }

    #[test]
    fn test_clock_runs_after_start() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);
    }

    #[test]
    fn test_clock_freezes_on_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_game_over(30);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();

        assert_eq!(metrics.elapsed_time, frozen);
        assert_eq!(metrics.final_score, Some(30));
    }
}
