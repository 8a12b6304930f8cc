//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{constants::DATA_DIR_ENV, notifier::Action};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "xstopwatch")]
#[command(about = "Persist, restore and broadcast stopwatch and timer state")]
#[command(version)]
pub struct Config {
    /// Directory holding the preference groups
    #[arg(long, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print both records as JSON
    Show,
    /// Load the records and broadcast them
    Broadcast {
        /// Only send the record this action refers to
        #[arg(long)]
        action: Option<Action>,
    },
    /// Change the stopwatch, then save and broadcast
    Stopwatch {
        #[command(subcommand)]
        op: StopwatchOp,
    },
    /// Change the timer, then save and broadcast
    Timer {
        #[command(subcommand)]
        op: TimerOp,
    },
    /// Answer action identifiers read from stdin, one per line
    Listen,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum StopwatchOp {
    Start,
    Pause,
    Reset,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum TimerOp {
    Start,
    Pause,
    Reset,
    /// Reset the timer and set its duration
    Set {
        /// Countdown length in seconds
        seconds: u32,
    },
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Resolve the store directory: flag or env, then the platform data dir
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("xstopwatch"))
                .unwrap_or_else(|| PathBuf::from(".xstopwatch"))
        })
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_broadcast_with_action() {
        let config = Config::try_parse_from([
            "xstopwatch",
            "--data-dir",
            "/tmp/prefs",
            "broadcast",
            "--action",
            "timer-query",
        ])
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/prefs"));
        match config.command {
            Command::Broadcast { action } => assert_eq!(action, Some(Action::TimerQuery)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(Config::try_parse_from(["xstopwatch", "broadcast", "--action", "nope"]).is_err());
    }

    #[test]
    fn parses_timer_set_and_verbose() {
        let config = Config::try_parse_from(["xstopwatch", "-v", "timer", "set", "90"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(matches!(
            config.command,
            Command::Timer {
                op: TimerOp::Set { seconds: 90 }
            }
        ));
    }
}
