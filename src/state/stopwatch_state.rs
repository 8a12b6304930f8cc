//! Stopwatch record and its mutations

use serde::Serialize;

use crate::{constants::*, store::PrefGroup};

/// Elapsed-time tracker. Times are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchState {
    pub start_time: i64,
    /// Time accumulated before the current running interval
    pub prior_time: i64,
    pub is_running: bool,
    pub is_reset: bool,
    pub update_timestamp: i64,
    #[serde(skip)]
    pub is_initialized: bool,
}

impl StopwatchState {
    /// Create an uninitialized, reset stopwatch
    pub fn new() -> Self {
        Self {
            start_time: 0,
            prior_time: 0,
            is_running: false,
            is_reset: true,
            update_timestamp: 0,
            is_initialized: false,
        }
    }

    /// Overwrite every field and mark the record initialized
    pub fn restore_state(
        &mut self,
        prior_time: i64,
        start_time: i64,
        is_running: bool,
        is_reset: bool,
        update_timestamp: i64,
    ) {
        self.prior_time = prior_time;
        self.start_time = start_time;
        self.is_running = is_running;
        self.is_reset = is_reset;
        self.update_timestamp = update_timestamp;
        self.is_initialized = true;
    }

    pub fn start(&mut self, now: i64) {
        if self.is_running {
            return;
        }
        self.start_time = now;
        self.is_running = true;
        self.is_reset = false;
        self.update_timestamp = now;
    }

    pub fn pause(&mut self, now: i64) {
        if !self.is_running {
            return;
        }
        self.prior_time = self.prior_time.saturating_add(now.saturating_sub(self.start_time));
        self.is_running = false;
        self.update_timestamp = now;
    }

    pub fn reset(&mut self, now: i64) {
        self.start_time = 0;
        self.prior_time = 0;
        self.is_running = false;
        self.is_reset = true;
        self.update_timestamp = now;
    }

    /// Total elapsed time as of `now`
    pub fn elapsed(&self, now: i64) -> i64 {
        if self.is_running {
            self.prior_time
                .saturating_add(now.saturating_sub(self.start_time))
        } else {
            self.prior_time
        }
    }

    pub fn to_prefs(&self) -> PrefGroup {
        let mut group = PrefGroup::new();
        group.put_long(PREF_STOPWATCH_START_TIME, self.start_time);
        group.put_long(PREF_STOPWATCH_BASE_TIME, self.prior_time);
        group.put_bool(PREF_STOPWATCH_RUNNING, self.is_running);
        group.put_bool(PREF_STOPWATCH_RESET, self.is_reset);
        group.put_long(PREF_STOPWATCH_UPDATE_TIMESTAMP, self.update_timestamp);
        group
    }

    /// Restore from a stored group, defaulting any missing field
    pub fn restore_from_prefs(&mut self, group: &PrefGroup) {
        self.restore_state(
            group.get_long(PREF_STOPWATCH_BASE_TIME, 0),
            group.get_long(PREF_STOPWATCH_START_TIME, 0),
            group.get_bool(PREF_STOPWATCH_RUNNING, false),
            group.get_bool(PREF_STOPWATCH_RESET, true),
            group.get_long(PREF_STOPWATCH_UPDATE_TIMESTAMP, 0),
        );
    }
}

impl Default for StopwatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pause_accumulates_prior_time() {
        let mut sw = StopwatchState::new();
        sw.start(1_000);
        sw.pause(1_400);
        sw.start(2_000);

        assert_eq!(sw.prior_time, 400);
        assert_eq!(sw.elapsed(2_250), 650);
        assert!(!sw.is_reset);
        assert_eq!(sw.update_timestamp, 2_000);
    }

    #[test]
    fn start_while_running_keeps_interval() {
        let mut sw = StopwatchState::new();
        sw.start(100);
        sw.start(500);
        assert_eq!(sw.start_time, 100);
    }

    #[test]
    fn extreme_times_saturate_instead_of_overflowing() {
        let mut sw = StopwatchState::new();
        sw.restore_state(i64::MAX - 10, i64::MIN + 5, true, false, 0);

        assert_eq!(sw.elapsed(1_000), i64::MAX);
        sw.pause(1_000);
        assert_eq!(sw.prior_time, i64::MAX);
        assert!(!sw.is_running);
    }

    #[test]
    fn reset_clears_times() {
        let mut sw = StopwatchState::new();
        sw.start(100);
        sw.pause(300);
        sw.reset(400);

        assert_eq!(sw.elapsed(1_000), 0);
        assert!(sw.is_reset);
        assert!(!sw.is_running);
        assert_eq!(sw.update_timestamp, 400);
    }

    #[test]
    fn empty_group_restores_defaults() {
        let mut sw = StopwatchState::new();
        sw.restore_from_prefs(&PrefGroup::new());

        assert!(sw.is_initialized);
        assert_eq!(
            (sw.start_time, sw.prior_time, sw.is_running, sw.is_reset, sw.update_timestamp),
            (0, 0, false, true, 0)
        );
    }

    #[test]
    fn prefs_use_base_time_key_for_prior_time() {
        let mut sw = StopwatchState::new();
        sw.restore_state(1_234, 10, true, false, 99);

        let group = sw.to_prefs();
        assert_eq!(group.get_long(PREF_STOPWATCH_BASE_TIME, 0), 1_234);
        assert_eq!(group.len(), 5);
    }
}
