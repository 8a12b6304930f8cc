//! Preference group names and field keys
//!
//! Notifications reuse the same keys as the stored groups.

pub const GROUP_STOPWATCH: &str = "stopwatch";
pub const GROUP_TIMER: &str = "timer";

pub const PREF_STOPWATCH_START_TIME: &str = "startTime";
pub const PREF_STOPWATCH_BASE_TIME: &str = "baseTime";
pub const PREF_STOPWATCH_RUNNING: &str = "running";
pub const PREF_STOPWATCH_RESET: &str = "reset";
pub const PREF_STOPWATCH_UPDATE_TIMESTAMP: &str = "updateTimestamp";

pub const PREF_TIMER_START_TIME: &str = "startTime";
pub const PREF_TIMER_PAUSE_ELAPSED: &str = "pauseElapsed";
pub const PREF_TIMER_DURATION: &str = "duration";
pub const PREF_TIMER_RUNNING: &str = "running";
pub const PREF_TIMER_RESET: &str = "reset";
pub const PREF_TIMER_UPDATE_TIMESTAMP: &str = "updateTimestamp";

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "XSTOPWATCH_DATA_DIR";
