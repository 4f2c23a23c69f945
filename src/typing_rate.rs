use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::settings::Settings;

/// Sliding-window heuristic for input that arrives implausibly fast.
///
/// Both the number of words currently in the answer box and the number of
/// input changes inside the window are compared against the same threshold,
/// `wpm_limit / (60 / window_secs)`. It is a throttle, not a WPM meter.
#[derive(Debug, Clone)]
pub struct TypingRateLimiter {
    window: Duration,
    threshold: f64,
    events: VecDeque<Instant>,
}

impl TypingRateLimiter {
    pub fn new(wpm_limit: u64, window: Duration) -> Self {
        let window_secs = window.as_secs_f64();
        // A zero limit or window switches the check off
        let threshold = if wpm_limit > 0 && window_secs > 0.0 {
            wpm_limit as f64 / (60.0 / window_secs)
        } else {
            f64::INFINITY
        };
        Self {
            window,
            threshold,
            events: VecDeque::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.wpm_limit, settings.tracking_window())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Input changes currently inside the window
    pub fn recent_events(&self) -> usize {
        self.events.len()
    }

    /// Records an input change and reports whether the rate is exceeded
    pub fn record(&mut self, now: Instant, word_count: usize) -> bool {
        self.events.push_back(now);
        while let Some(&oldest) = self.events.front() {
            if now.saturating_duration_since(oldest) > self.window {
                self.events.pop_front();
            } else {
                break;
            }
        }

        word_count as f64 >= self.threshold && self.events.len() as f64 >= self.threshold
    }

    pub fn reset(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_threshold_is_five() {
        let limiter = TypingRateLimiter::from_settings(&Settings::default());
        assert_eq!(limiter.threshold(), 5.0);
    }

    #[test]
    fn fractional_threshold_is_not_truncated() {
        // 25 / (60 / 10) = 4.17 -> five events and five words needed
        let mut limiter = TypingRateLimiter::new(25, Duration::from_secs(10));
        let start = Instant::now();
        for i in 0..4 {
            assert!(!limiter.record(start + Duration::from_millis(i * 100), 10));
        }
        assert!(limiter.record(start + Duration::from_millis(400), 10));
    }

    #[test]
    fn needs_both_words_and_events() {
        let mut limiter = TypingRateLimiter::new(30, Duration::from_secs(10));
        let start = Instant::now();
        // plenty of events but few words
        for i in 0..20 {
            assert!(!limiter.record(start + Duration::from_millis(i * 50), 4));
        }
        // enough words now
        assert!(limiter.record(start + Duration::from_millis(1_100), 5));
    }

    #[test]
    fn old_events_fall_out_of_the_window() {
        let mut limiter = TypingRateLimiter::new(30, Duration::from_secs(10));
        let start = Instant::now();
        for i in 0..4 {
            limiter.record(start + Duration::from_secs(i), 9);
        }
        // Far enough later that the first four have expired
        assert!(!limiter.record(start + Duration::from_secs(14), 9));
        assert_eq!(limiter.recent_events(), 1);
    }

    #[test]
    fn window_follows_configured_duration() {
        let mut limiter = TypingRateLimiter::new(60, Duration::from_secs(2));
        assert_eq!(limiter.threshold(), 2.0);
        let start = Instant::now();
        limiter.record(start, 3);
        // 3s later the first event is outside a 2s window
        assert!(!limiter.record(start + Duration::from_secs(3), 3));
        assert!(limiter.record(start + Duration::from_millis(3_500), 3));
    }

    #[test]
    fn zero_limit_disables_the_check() {
        let mut limiter = TypingRateLimiter::new(0, Duration::from_secs(10));
        let start = Instant::now();
        for i in 0..50 {
            assert!(!limiter.record(start + Duration::from_millis(i), 100));
        }
    }
}
