//! Outbound notification payloads

use serde::{Deserialize, Serialize};

use crate::state::{StopwatchState, TimerState};

/// Which record a notification carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Stopwatch,
    Timer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchUpdate {
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "baseTime")]
    pub prior_time: i64,
    pub running: bool,
    pub reset: bool,
    #[serde(rename = "updateTimestamp")]
    pub update_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerUpdate {
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "pauseElapsed")]
    pub pause_elapsed: i64,
    pub duration: i64,
    pub running: bool,
    pub reset: bool,
    #[serde(rename = "updateTimestamp")]
    pub update_timestamp: i64,
}

/// Message sent to listeners, tagged with its update action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Notification {
    #[serde(rename = "stopwatch-update")]
    Stopwatch(StopwatchUpdate),
    #[serde(rename = "timer-update")]
    Timer(TimerUpdate),
}

impl Notification {
    pub fn kind(&self) -> RecordKind {
        match self {
            Notification::Stopwatch(_) => RecordKind::Stopwatch,
            Notification::Timer(_) => RecordKind::Timer,
        }
    }
}

impl From<&StopwatchState> for StopwatchUpdate {
    fn from(state: &StopwatchState) -> Self {
        Self {
            start_time: state.start_time,
            prior_time: state.prior_time,
            running: state.is_running,
            reset: state.is_reset,
            update_timestamp: state.update_timestamp,
        }
    }
}

impl From<&TimerState> for TimerUpdate {
    fn from(state: &TimerState) -> Self {
        Self {
            start_time: state.start_time,
            pause_elapsed: state.pause_elapsed,
            duration: state.duration,
            running: state.is_running,
            reset: state.is_reset,
            update_timestamp: state.update_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_notification_wire_shape() {
        let mut timer = TimerState::new();
        timer.restore_state(500, 20, 1_000, true, false, 1_020);

        let json = serde_json::to_value(Notification::Timer((&timer).into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "timer-update",
                "startTime": 1_000,
                "pauseElapsed": 20,
                "duration": 500,
                "running": true,
                "reset": false,
                "updateTimestamp": 1_020,
            })
        );
    }

    #[test]
    fn stopwatch_notification_carries_five_fields() {
        let sw = StopwatchState::new();
        let json = serde_json::to_value(Notification::Stopwatch((&sw).into())).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["action"], "stopwatch-update");
        assert_eq!(object.len(), 6);
        assert_eq!(object["baseTime"], 0);
        assert_eq!(object["reset"], true);
    }
}
