use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One challenge run lasts 24 minutes.
pub const CHALLENGE_LIMIT: Duration = Duration::from_secs(24 * 60);

/// Counts elapsed play time up to a fixed limit.
///
/// Stored in whole milliseconds so it serializes as plain integers with the
/// rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTimer {
    elapsed_ms: u64,
    limit_ms: u64,
}

impl ChallengeTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            elapsed_ms: 0,
            limit_ms: limit.as_millis() as u64,
        }
    }

    pub fn default_challenge() -> Self {
        Self::new(CHALLENGE_LIMIT)
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.limit_ms.saturating_sub(self.elapsed_ms))
    }

    pub fn is_up(&self) -> bool {
        self.elapsed_ms >= self.limit_ms
    }

    /// Accumulates `dt` while `running`; saturates at the limit.
    pub fn tick_if_running(&mut self, dt: Duration, running: bool) {
        if !running || self.is_up() {
            return;
        }
        let dt_ms = dt.as_millis().min(u64::MAX as u128) as u64;
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.limit_ms);
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Remaining time as `MM:SS` for the HUD countdown.
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = ChallengeTimer::new(Duration::from_secs(10));
        timer.tick_if_running(Duration::from_secs(3), false);
        assert_eq!(timer.elapsed(), Duration::ZERO);
        timer.tick_if_running(Duration::from_secs(3), true);
        assert_eq!(timer.elapsed(), Duration::from_secs(3));
        assert!(!timer.is_up());
    }

    #[test]
    fn saturates_at_the_limit() {
        let mut timer = ChallengeTimer::new(Duration::from_secs(5));
        timer.tick_if_running(Duration::from_secs(60), true);
        assert!(timer.is_up());
        assert_eq!(timer.remaining(), Duration::ZERO);
        timer.tick_if_running(Duration::from_secs(60), true);
        assert_eq!(timer.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn reset_restarts_the_run() {
        let mut timer = ChallengeTimer::new(Duration::from_secs(5));
        timer.tick_if_running(Duration::from_secs(5), true);
        assert!(timer.is_up());
        timer.reset();
        assert!(!timer.is_up());
        assert_eq!(timer.remaining(), Duration::from_secs(5));
    }

    #[test]
    fn formats_remaining_as_minutes_and_seconds() {
        let mut timer = ChallengeTimer::default_challenge();
        assert_eq!(timer.format_remaining(), "24:00");
        timer.tick_if_running(Duration::from_secs(61), true);
        assert_eq!(timer.format_remaining(), "22:59");
        timer.tick_if_running(CHALLENGE_LIMIT, true);
        assert_eq!(timer.format_remaining(), "00:00");
    }

    #[test]
    fn serde_round_trip() {
        let mut timer = ChallengeTimer::default_challenge();
        timer.tick_if_running(Duration::from_millis(1234), true);
        let json = serde_json::to_string(&timer).unwrap();
        let back: ChallengeTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timer);
    }
}
