//! Writes notifications to an output stream as JSON lines

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::broadcast::{self, error::RecvError},
};
use tracing::{error, warn};

use crate::notifier::Notification;

/// Forward every notification until all senders are gone.
pub async fn print_notifications<W>(mut rx: broadcast::Receiver<Notification>, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    loop {
        match rx.recv().await {
            Ok(notification) => {
                let line = match serde_json::to_string(&notification) {
                    Ok(line) => line,
                    Err(e) => {
                        error!("Failed to serialize notification: {}", e);
                        continue;
                    }
                };
                if let Err(e) = out.write_all(format!("{}\n", line).as_bytes()).await {
                    error!("Failed to write notification: {}", e);
                    break;
                }
                if let Err(e) = out.flush().await {
                    error!("Failed to flush notifications: {}", e);
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification printer lagged, skipped {} messages", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
