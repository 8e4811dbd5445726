use std::time::{Duration, Instant};

use crate::game::Phase;

/// Round clock and session counters shown in the header
pub struct GameMetrics {
    running_since: Option<Instant>,
    accumulated: Duration,
    pub games_played: u32,
    last_phase: Phase,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            accumulated: Duration::ZERO,
            games_played: 0,
            last_phase: Phase::Loading,
        }
    }

    /// Follow the game's phase. The clock only runs while the round is
    /// running and is zeroed whenever a fresh round is ready.
    pub fn observe(&mut self, phase: Phase) {
        if phase == self.last_phase {
            return;
        }

        self.stop_clock();
        match phase {
            Phase::Running => self.running_since = Some(Instant::now()),
            Phase::Ready => self.accumulated = Duration::ZERO,
            Phase::Over => self.games_played += 1,
            Phase::Loading | Phase::Paused => {}
        }
        self.last_phase = phase;
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    /// Time spent running in the current round
    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.running_since.map_or(Duration::ZERO, |since| since.elapsed())
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
