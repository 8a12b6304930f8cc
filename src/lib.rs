//! xstopwatch-prefs - persistence and broadcast of stopwatch and timer state
//!
//! Records are saved to named groups of a key-value store, restored at
//! startup (resetting timers that expired in the meantime) and sent to
//! listeners as typed notifications.

pub mod config;
pub mod constants;
pub mod notifier;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use notifier::{Action, Notification, Notifier};
pub use state::{AppState, StopwatchState, TimerState};
pub use store::{FileStore, MemoryStore, PreferenceStore};
