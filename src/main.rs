//! xstopwatch - persist, restore and broadcast stopwatch and timer state
//!
//! Opens the preference directory, runs one command against the records and
//! prints every notification sent as a JSON line on stdout.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{debug, info};

use xstopwatch_prefs::{
    config::{Command, Config, StopwatchOp, TimerOp},
    notifier::Action,
    state::AppState,
    store::FileStore,
    tasks::{listen_task, print_notifications, spawn_line_reader},
    utils::{now_millis, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries notifications
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "xstopwatch={0},xstopwatch_prefs={0}",
            config.log_level()
        ))
        .with_writer(std::io::stderr)
        .init();

    let data_dir = config.data_dir();
    debug!("Using preferences in {}", data_dir.display());
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open preferences in {}", data_dir.display()))?;

    let (state, tx, rx) = AppState::with_channel(Box::new(store));
    let state = Arc::new(state);
    let printer = tokio::spawn(print_notifications(rx, tokio::io::stdout()));

    let result = run(Arc::clone(&state), config.command).await;

    // The printer stops once every sender is gone
    drop(state);
    drop(tx);
    printer.await.context("Notification printer panicked")?;

    result
}

async fn run(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            let now = now_millis();
            state.load_preferences(now)?;
            let stopwatch = state.get_stopwatch_state()?;
            let timer = state.get_timer_state()?;
            let view = serde_json::json!({
                "stopwatch": stopwatch,
                "stopwatchElapsed": stopwatch.elapsed(now),
                "timer": timer,
                "timerRemaining": timer.remaining(now),
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Broadcast { action } => {
            let report = state.broadcast_preferences(action, now_millis())?;
            if !report.skipped.is_empty() {
                bail!("Could not broadcast {:?}", report.skipped);
            }
        }
        Command::Stopwatch { op } => {
            let now = now_millis();
            state.load_preferences(now)?;
            let stopwatch = state.update_stopwatch(|sw| match op {
                StopwatchOp::Start => sw.start(now),
                StopwatchOp::Pause => sw.pause(now),
                StopwatchOp::Reset => sw.reset(now),
            })?;
            info!("Stopwatch {:?}: elapsed {}ms", op, stopwatch.elapsed(now));
            save_and_notify(&state, Action::StopwatchUpdate, now)?;
        }
        Command::Timer { op } => {
            let now = now_millis();
            state.load_preferences(now)?;
            let timer = state.update_timer(|t| match op {
                TimerOp::Start => t.start(now),
                TimerOp::Pause => t.pause(now),
                TimerOp::Reset => t.reset(now),
                TimerOp::Set { seconds } => t.set_duration(i64::from(seconds) * 1000, now),
            })?;
            info!("Timer {:?}: remaining {}ms", op, timer.remaining(now));
            save_and_notify(&state, Action::TimerUpdate, now)?;
        }
        Command::Listen => {
            state.load_preferences(now_millis())?;
            let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
            tokio::select! {
                answered = listen_task(Arc::clone(&state), lines) => {
                    info!("Query input closed after {} broadcasts", answered);
                }
                _ = shutdown_signal() => {
                    info!("Shutdown signal received");
                }
            }
        }
    }

    Ok(())
}

fn save_and_notify(state: &AppState, action: Action, now: i64) -> anyhow::Result<()> {
    let report = state.save_preferences()?;
    state.broadcast_preferences(Some(action), now)?;
    if !report.is_complete() {
        bail!("Preferences were only partially saved: {:?}", report);
    }
    Ok(())
}
