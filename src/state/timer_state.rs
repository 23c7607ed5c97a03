//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Format a number of seconds as `MM:SS`
///
/// Minutes are not wrapped at 60, so long prep times render as e.g. `90:00`.
pub fn format_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Timer state for tracking the prep countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Full configured duration in seconds (0 means the timer is disabled)
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    /// Whether a countdown task is currently scheduled
    pub running: bool,
    /// Set once the countdown has reached zero
    pub time_up: bool,
}

impl TimerState {
    /// Create an idle timer for the given prep time in minutes
    pub fn new(prep_minutes: u64) -> Self {
        let duration_seconds = prep_minutes.saturating_mul(60);
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            running: false,
            time_up: false,
        }
    }

    /// A zero prep time disables the countdown entirely
    pub fn is_enabled(&self) -> bool {
        self.duration_seconds > 0
    }

    /// Refill to the full duration and mark as running
    pub fn restart(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.running = true;
        self.time_up = false;
    }

    /// Stop counting and show the full duration again
    pub fn reset(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.running = false;
        self.time_up = false;
    }

    /// Count down one second. Returns true when this tick hit zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            self.time_up = true;
            return true;
        }
        false
    }

    /// Current display text
    pub fn display(&self) -> String {
        format_seconds(self.remaining_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_seconds(125), "02:05");
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(59), "00:59");
        assert_eq!(format_seconds(60), "01:00");
        assert_eq!(format_seconds(5400), "90:00");
    }

    #[test]
    fn disabled_when_prep_is_zero() {
        let timer = TimerState::new(0);
        assert!(!timer.is_enabled());
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn counts_down_to_zero_and_stops() {
        let mut timer = TimerState::new(1);
        timer.restart();
        for _ in 0..59 {
            assert!(!timer.tick());
        }
        assert_eq!(timer.display(), "00:01");
        assert!(timer.tick());
        assert_eq!(timer.display(), "00:00");
        assert!(timer.time_up);
        assert!(!timer.running);

        // Further ticks never go below zero
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds, 0);
    }

    #[test]
    fn restart_refills_full_duration() {
        let mut timer = TimerState::new(2);
        timer.restart();
        timer.tick();
        timer.tick();
        timer.restart();
        assert_eq!(timer.remaining_seconds, 120);
        assert!(timer.running);
    }
}
