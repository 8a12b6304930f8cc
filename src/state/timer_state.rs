//! Countdown timer record and its mutations

use serde::Serialize;
use tracing::debug;

use crate::{constants::*, store::PrefGroup};

/// Countdown tracker. Times are epoch milliseconds.
///
/// While running, `start_time` is shifted back by the time consumed before
/// the last pause, so `start_time + duration` is always the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub start_time: i64,
    /// Time consumed before the last pause
    pub pause_elapsed: i64,
    pub duration: i64,
    pub is_running: bool,
    pub is_reset: bool,
    pub update_timestamp: i64,
    #[serde(skip)]
    pub is_initialized: bool,
}

impl TimerState {
    /// Create an uninitialized, reset timer with no duration
    pub fn new() -> Self {
        Self {
            start_time: 0,
            pause_elapsed: 0,
            duration: 0,
            is_running: false,
            is_reset: true,
            update_timestamp: 0,
            is_initialized: false,
        }
    }

    /// Overwrite every field and mark the record initialized
    pub fn restore_state(
        &mut self,
        duration: i64,
        pause_elapsed: i64,
        start_time: i64,
        is_running: bool,
        is_reset: bool,
        update_timestamp: i64,
    ) {
        self.duration = duration;
        self.pause_elapsed = pause_elapsed;
        self.start_time = start_time;
        self.is_running = is_running;
        self.is_reset = is_reset;
        self.update_timestamp = update_timestamp;
        self.is_initialized = true;
    }

    /// Reset the timer and arm it with a new target length
    pub fn set_duration(&mut self, duration: i64, now: i64) {
        self.reset(now);
        self.duration = duration.max(0);
    }

    pub fn start(&mut self, now: i64) {
        if self.is_running || self.duration == 0 {
            return;
        }
        self.start_time = now.saturating_sub(self.pause_elapsed);
        self.is_running = true;
        self.is_reset = false;
        self.update_timestamp = now;
    }

    pub fn pause(&mut self, now: i64) {
        if !self.is_running {
            return;
        }
        self.pause_elapsed = now.saturating_sub(self.start_time);
        self.is_running = false;
        self.update_timestamp = now;
    }

    /// Stop and rewind, keeping the configured duration
    pub fn reset(&mut self, now: i64) {
        self.start_time = 0;
        self.pause_elapsed = 0;
        self.is_running = false;
        self.is_reset = true;
        self.update_timestamp = now;
    }

    /// Saturates at `i64::MAX` / `i64::MIN`
    pub fn deadline(&self) -> i64 {
        self.start_time.saturating_add(self.duration)
    }

    /// True when the timer claims to be running past its deadline
    pub fn is_expired(&self, now: i64) -> bool {
        self.is_running && self.deadline() < now
    }

    /// Time left as of `now`, never negative
    pub fn remaining(&self, now: i64) -> i64 {
        let consumed = if self.is_running {
            now.saturating_sub(self.start_time)
        } else {
            self.pause_elapsed
        };
        self.duration.saturating_sub(consumed).max(0)
    }

    /// Coerce an expired timer back to the reset state.
    ///
    /// Returns whether the record was changed.
    pub fn apply_staleness_reset(&mut self, now: i64) -> bool {
        if !self.is_expired(now) {
            return false;
        }
        debug!(
            "Timer deadline {} already passed at {}, resetting",
            self.deadline(),
            now
        );
        self.is_running = false;
        self.is_reset = true;
        true
    }

    pub fn to_prefs(&self) -> PrefGroup {
        let mut group = PrefGroup::new();
        group.put_long(PREF_TIMER_START_TIME, self.start_time);
        group.put_long(PREF_TIMER_PAUSE_ELAPSED, self.pause_elapsed);
        group.put_long(PREF_TIMER_DURATION, self.duration);
        group.put_bool(PREF_TIMER_RUNNING, self.is_running);
        group.put_bool(PREF_TIMER_RESET, self.is_reset);
        group.put_long(PREF_TIMER_UPDATE_TIMESTAMP, self.update_timestamp);
        group
    }

    /// Restore from a stored group, defaulting missing fields and applying
    /// the staleness reset against `now`
    pub fn restore_from_prefs(&mut self, group: &PrefGroup, now: i64) {
        let mut restored = TimerState::new();
        restored.restore_state(
            group.get_long(PREF_TIMER_DURATION, 0),
            group.get_long(PREF_TIMER_PAUSE_ELAPSED, 0),
            group.get_long(PREF_TIMER_START_TIME, 0),
            group.get_bool(PREF_TIMER_RUNNING, false),
            group.get_bool(PREF_TIMER_RESET, true),
            group.get_long(PREF_TIMER_UPDATE_TIMESTAMP, 0),
        );
        restored.apply_staleness_reset(now);
        *self = restored;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_timer(start_time: i64, duration: i64) -> PrefGroup {
        let mut timer = TimerState::new();
        timer.restore_state(duration, 0, start_time, true, false, start_time);
        timer.to_prefs()
    }

    #[test]
    fn expired_timer_is_reset_on_restore() {
        let mut timer = TimerState::new();
        timer.restore_from_prefs(&running_timer(1_000, 500), 2_000);

        assert!(!timer.is_running);
        assert!(timer.is_reset);
        assert!(timer.is_initialized);
        assert_eq!(timer.start_time, 1_000);
        assert_eq!(timer.duration, 500);
    }

    #[test]
    fn timer_before_deadline_keeps_running() {
        let mut timer = TimerState::new();
        timer.restore_from_prefs(&running_timer(1_000, 500), 1_200);

        assert!(timer.is_running);
        assert!(!timer.is_reset);
    }

    #[test]
    fn deadline_exactly_now_is_not_stale() {
        let mut timer = TimerState::new();
        timer.restore_from_prefs(&running_timer(1_000, 500), 1_500);
        assert!(timer.is_running);
    }

    #[test]
    fn deadline_near_i64_max_does_not_overflow() {
        let mut timer = TimerState::new();
        timer.restore_from_prefs(&running_timer(i64::MAX - 10, 1_000), 2_000);

        assert_eq!(timer.deadline(), i64::MAX);
        assert!(timer.is_running);
        assert_eq!(timer.remaining(i64::MAX), 990);
        assert_eq!(timer.remaining(i64::MIN), i64::MAX);

        timer.pause(i64::MIN);
        assert_eq!(timer.pause_elapsed, i64::MIN);
        assert_eq!(timer.remaining(0), i64::MAX);
    }

    #[test]
    fn paused_timer_is_never_stale() {
        let mut timer = TimerState::new();
        timer.restore_state(500, 200, 1_000, false, false, 1_200);
        assert!(!timer.apply_staleness_reset(1_000_000));
        assert!(!timer.is_reset);
    }

    #[test]
    fn pause_and_resume_preserve_remaining_time() {
        let mut timer = TimerState::new();
        timer.set_duration(10_000, 0);
        timer.start(1_000);
        timer.pause(4_000);

        assert_eq!(timer.pause_elapsed, 3_000);
        assert_eq!(timer.remaining(50_000), 7_000);

        timer.start(20_000);
        assert_eq!(timer.start_time, 17_000);
        assert_eq!(timer.deadline(), 27_000);
        assert_eq!(timer.remaining(22_000), 5_000);
        assert_eq!(timer.remaining(30_000), 0);
    }

    #[test]
    fn start_without_duration_is_ignored() {
        let mut timer = TimerState::new();
        timer.start(100);
        assert!(!timer.is_running);
        assert!(timer.is_reset);
    }

    #[test]
    fn reset_keeps_duration() {
        let mut timer = TimerState::new();
        timer.set_duration(60_000, 0);
        timer.start(10);
        timer.reset(20);

        assert_eq!(timer.duration, 60_000);
        assert!(timer.is_reset);
        assert_eq!(timer.remaining(1_000), 60_000);
    }

    #[test]
    fn empty_group_restores_defaults() {
        let mut timer = TimerState::new();
        timer.restore_from_prefs(&PrefGroup::new(), 5_000);

        assert_eq!(
            (
                timer.start_time,
                timer.pause_elapsed,
                timer.duration,
                timer.is_running,
                timer.is_reset,
                timer.update_timestamp
            ),
            (0, 0, 0, false, true, 0)
        );
        assert!(timer.is_initialized);
    }
}
