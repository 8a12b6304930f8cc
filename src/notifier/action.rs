//! Well-known requested-action identifiers

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    StopwatchQuery,
    StopwatchUpdate,
    TimerQuery,
    TimerUpdate,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown action '{0}' (expected stopwatch-query, stopwatch-update, timer-query or timer-update)")]
pub struct ParseActionError(pub String);

impl Action {
    pub const ALL: [Action; 4] = [
        Action::StopwatchQuery,
        Action::StopwatchUpdate,
        Action::TimerQuery,
        Action::TimerUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::StopwatchQuery => "stopwatch-query",
            Action::StopwatchUpdate => "stopwatch-update",
            Action::TimerQuery => "timer-query",
            Action::TimerUpdate => "timer-update",
        }
    }

    /// Record a query or update action refers to
    pub fn record(&self) -> RecordKind {
        match self {
            Action::StopwatchQuery | Action::StopwatchUpdate => RecordKind::Stopwatch,
            Action::TimerQuery | Action::TimerUpdate => RecordKind::Timer,
        }
    }
}

/// Whether a broadcast filtered by `requested` should carry `kind`
pub fn selects(requested: Option<Action>, kind: RecordKind) -> bool {
    requested.map_or(true, |action| action.record() == kind)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}
