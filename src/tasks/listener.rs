//! Query listener task

use std::{io::BufRead, sync::Arc, thread};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{notifier::Action, state::AppState, utils::now_millis};

/// Lines buffered between the reader thread and the listener
const LINE_CHANNEL_CAPACITY: usize = 16;

/// Read `input` line by line on a dedicated OS thread.
///
/// The thread is detached: a read blocked on stdin never holds up runtime
/// shutdown. The channel closes at EOF, on a read error, or once the
/// receiver is dropped and the next line arrives.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Error reading query input: {}", e);
                    break;
                }
            }
        }
        debug!("Query input closed");
    });
    rx
}

/// Answer requested actions, one per line, until the line channel closes.
///
/// A blank line broadcasts both records. Unknown identifiers are logged and
/// ignored. Returns the number of broadcasts performed.
pub async fn listen_task(state: Arc<AppState>, mut lines: mpsc::Receiver<String>) -> usize {
    info!("Starting query listener");
    let mut answered = 0;

    while let Some(line) = lines.recv().await {
        let action = if line.trim().is_empty() {
            None
        } else {
            match line.parse::<Action>() {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            }
        };

        match state.broadcast_preferences(action, now_millis()) {
            Ok(report) => {
                debug!("Answered {:?}: {:?}", action, report);
                answered += 1;
            }
            Err(e) => error!("Failed to broadcast preferences: {}", e),
        }
    }

    answered
}
