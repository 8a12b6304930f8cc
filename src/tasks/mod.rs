//! Background tasks module
//!
//! Tasks that run alongside the CLI while it listens for queries.

pub mod listener;
pub mod printer;

pub use listener::{listen_task, spawn_line_reader};
pub use printer::print_notifications;
