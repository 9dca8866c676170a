use std::time::{Duration, Instant};

/// Stats for the running process. Nothing here outlives it.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Whether the last finished game beat the previous best
    pub last_was_best: bool,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            last_was_best: false,
            running: false,
        }
    }

    /// Refresh the clock; it stands still between games and while paused
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_was_best = false;
        self.running = true;
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.running = false;
    }

    /// Pick the clock up where [`GameMetrics::on_pause`] left it
    pub fn on_resume(&mut self) {
        self.start_time = Instant::now()
            .checked_sub(self.elapsed_time)
            .unwrap_or_else(Instant::now);
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.last_was_best = final_score > self.high_score;
        if self.last_was_best {
            self.high_score = final_score;
        }
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
