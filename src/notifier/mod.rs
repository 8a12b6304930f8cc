//! Notification delivery
//!
//! Records are copied into typed [`Notification`]s and handed to an injected
//! [`Notifier`]. Delivery is fire-and-forget.

pub mod action;
pub mod notification;

use tokio::sync::broadcast;
use tracing::debug;

pub use action::{selects, Action, ParseActionError};
pub use notification::{Notification, RecordKind, StopwatchUpdate, TimerUpdate};

/// Capacity of the default notification channel
pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;

/// Sink for outbound notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl Notifier for broadcast::Sender<Notification> {
    fn notify(&self, notification: Notification) {
        let kind = notification.kind();
        if let Err(e) = self.send(notification) {
            debug!("Dropped {:?} notification, no subscribers: {}", kind, e);
        }
    }
}

/// Create the default broadcast notifier and one subscriber
pub fn channel() -> (broadcast::Sender<Notification>, broadcast::Receiver<Notification>) {
    broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerState;

    #[test]
    fn broadcast_sender_delivers_to_subscribers() {
        let (tx, mut rx) = channel();
        let timer = TimerState::new();

        tx.notify(Notification::Timer((&timer).into()));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.kind(), RecordKind::Timer);
    }

    #[test]
    fn notify_without_subscribers_does_not_panic() {
        let (tx, rx) = channel();
        drop(rx);
        tx.notify(Notification::Timer((&TimerState::new()).into()));
    }
}
