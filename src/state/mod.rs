//! State management module
//!
//! The stopwatch and timer records, plus the [`AppState`] that persists,
//! restores and broadcasts them.

pub mod app_state;
pub mod stopwatch_state;
pub mod timer_state;

pub use app_state::{AppState, BroadcastReport, SaveReport, StateError};
pub use stopwatch_state::StopwatchState;
pub use timer_state::TimerState;
