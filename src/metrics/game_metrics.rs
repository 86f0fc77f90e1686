use std::time::{Duration, Instant};

use crate::game::StepOutcome;

/// Session statistics shown in the header and on the game-over panel
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Most fruits eaten in a single game this session
    pub high_score: u32,
    pub games_played: u32,
    /// Why the last game ended, if one has
    pub last_cause: Option<&'static str>,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            last_cause: None,
            running: true,
        }
    }

    /// Refresh the clock; frozen once the game is over
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_cause = None;
        self.running = true;
    }

    pub fn on_game_over(&mut self, fruits_eaten: u32, outcome: &StepOutcome) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(fruits_eaten);
        self.last_cause = match outcome {
            StepOutcome::HitWall => Some("Hit the wall"),
            StepOutcome::HitSelf => Some("Bit your own tail"),
            StepOutcome::Continued(_) => None,
        };
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
