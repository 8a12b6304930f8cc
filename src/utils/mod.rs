//! Utility functions module

pub mod clock;
pub mod signals;

pub use clock::now_millis;
pub use signals::shutdown_signal;
