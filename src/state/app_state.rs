//! Application state: the two records, their store and the notifier

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::{StopwatchState, TimerState};
use crate::{
    constants::{GROUP_STOPWATCH, GROUP_TIMER},
    notifier::{self, selects, Action, Notification, Notifier, RecordKind},
    store::{PreferenceStore, StoreError},
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to lock {0}")]
    Lock(&'static str),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Which groups a save managed to commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub stopwatch_committed: bool,
    pub timer_committed: bool,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.stopwatch_committed && self.timer_committed
    }
}

/// Which notifications a broadcast sent or had to skip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub emitted: Vec<RecordKind>,
    pub skipped: Vec<RecordKind>,
}

/// Owns the in-memory stopwatch and timer records.
///
/// Every operation takes the lock of the record it touches, so callers on
/// different threads are serialized. Locks are never held across a store
/// call.
pub struct AppState {
    stopwatch: Mutex<StopwatchState>,
    timer: Mutex<TimerState>,
    store: Mutex<Box<dyn PreferenceStore>>,
    notifier: Arc<dyn Notifier>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &'static str) -> Result<MutexGuard<'a, T>, StateError> {
    mutex.lock().map_err(|_| StateError::Lock(what))
}

impl AppState {
    /// Create state with uninitialized records
    pub fn new(store: Box<dyn PreferenceStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            stopwatch: Mutex::new(StopwatchState::new()),
            timer: Mutex::new(TimerState::new()),
            store: Mutex::new(store),
            notifier,
        }
    }

    /// Create state that notifies through a fresh broadcast channel
    pub fn with_channel(
        store: Box<dyn PreferenceStore>,
    ) -> (Self, broadcast::Sender<Notification>, broadcast::Receiver<Notification>) {
        let (tx, rx) = notifier::channel();
        let state = Self::new(store, Arc::new(tx.clone()));
        (state, tx, rx)
    }

    pub fn get_stopwatch_state(&self) -> Result<StopwatchState, StateError> {
        Ok(lock(&self.stopwatch, "stopwatch state")?.clone())
    }

    pub fn get_timer_state(&self) -> Result<TimerState, StateError> {
        Ok(lock(&self.timer, "timer state")?.clone())
    }

    /// Apply a mutation to the stopwatch and return the new record
    pub fn update_stopwatch<F>(&self, updater: F) -> Result<StopwatchState, StateError>
    where
        F: FnOnce(&mut StopwatchState),
    {
        let mut stopwatch = lock(&self.stopwatch, "stopwatch state")?;
        updater(&mut stopwatch);
        Ok(stopwatch.clone())
    }

    /// Apply a mutation to the timer and return the new record
    pub fn update_timer<F>(&self, updater: F) -> Result<TimerState, StateError>
    where
        F: FnOnce(&mut TimerState),
    {
        let mut timer = lock(&self.timer, "timer state")?;
        updater(&mut timer);
        Ok(timer.clone())
    }

    pub fn is_initialized(&self) -> Result<bool, StateError> {
        Ok(lock(&self.stopwatch, "stopwatch state")?.is_initialized
            && lock(&self.timer, "timer state")?.is_initialized)
    }

    /// Write both records to their groups.
    ///
    /// Groups are committed independently; a failed commit is logged and does
    /// not stop the other group from being attempted.
    pub fn save_preferences(&self) -> Result<SaveReport, StateError> {
        debug!("save_preferences");
        let stopwatch = self.get_stopwatch_state()?.to_prefs();
        let timer = self.get_timer_state()?.to_prefs();

        let mut store = lock(&self.store, "preference store")?;

        let stopwatch_committed = match store.commit_group(GROUP_STOPWATCH, &stopwatch) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to commit stopwatch preferences: {}", e);
                false
            }
        };
        let timer_committed = match store.commit_group(GROUP_TIMER, &timer) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to commit timer preferences: {}", e);
                false
            }
        };

        Ok(SaveReport {
            stopwatch_committed,
            timer_committed,
        })
    }

    /// Reload both records from the store, resetting a timer whose deadline
    /// passed before `now`.
    ///
    /// Missing fields take their defaults. A group that cannot be read at all
    /// is logged and its record is left as it was.
    pub fn load_preferences(&self, now: i64) -> Result<(), StateError> {
        debug!("load_preferences");
        let (stopwatch_prefs, timer_prefs) = {
            let store = lock(&self.store, "preference store")?;
            (store.read_group(GROUP_STOPWATCH), store.read_group(GROUP_TIMER))
        };

        match stopwatch_prefs {
            Ok(group) => {
                let mut stopwatch = lock(&self.stopwatch, "stopwatch state")?;
                stopwatch.restore_from_prefs(&group);
                debug!(
                    "Stopwatch:: startTime({}), priorTime({}), isRunning({}), isReset({}), updateTimestamp({})",
                    stopwatch.start_time,
                    stopwatch.prior_time,
                    stopwatch.is_running,
                    stopwatch.is_reset,
                    stopwatch.update_timestamp
                );
            }
            Err(e) => error!("Failed to read stopwatch preferences: {}", e),
        }

        match timer_prefs {
            Ok(group) => {
                let mut timer = lock(&self.timer, "timer state")?;
                timer.restore_from_prefs(&group, now);
                debug!(
                    "Timer:: startTime({}), pauseElapsed({}), duration({}), isRunning({}), isReset({}), updateTimestamp({})",
                    timer.start_time,
                    timer.pause_elapsed,
                    timer.duration,
                    timer.is_running,
                    timer.is_reset,
                    timer.update_timestamp
                );
            }
            Err(e) => error!("Failed to read timer preferences: {}", e),
        }

        Ok(())
    }

    /// Send the records selected by `action` (both when `None`) to the
    /// notifier, loading from the store first if either record is still
    /// uninitialized. A timer past its deadline at `now` is reset before it
    /// is sent.
    pub fn broadcast_preferences(
        &self,
        action: Option<Action>,
        now: i64,
    ) -> Result<BroadcastReport, StateError> {
        debug!("broadcast_preferences (action: {:?})", action);

        // We may have been asked for state before anything loaded it.
        if !self.is_initialized()? {
            info!("Records not initialized, loading preferences before broadcast");
            self.load_preferences(now)?;
        }

        let mut report = BroadcastReport::default();

        if selects(action, RecordKind::Stopwatch) {
            let stopwatch = self.get_stopwatch_state()?;
            if stopwatch.is_initialized {
                debug!("Broadcasting stopwatch preferences");
                self.notifier
                    .notify(Notification::Stopwatch((&stopwatch).into()));
                report.emitted.push(RecordKind::Stopwatch);
            } else {
                error!("Stopwatch state not initialized, can't broadcast preferences");
                report.skipped.push(RecordKind::Stopwatch);
            }
        }

        if selects(action, RecordKind::Timer) {
            // A timer loaded earlier may have run past its deadline since.
            let timer = self.update_timer(|t| {
                if t.is_initialized {
                    t.apply_staleness_reset(now);
                }
            })?;
            if timer.is_initialized {
                debug!("Broadcasting timer preferences");
                self.notifier.notify(Notification::Timer((&timer).into()));
                report.emitted.push(RecordKind::Timer);
            } else {
                error!("Timer state not initialized, can't broadcast preferences");
                report.skipped.push(RecordKind::Timer);
            }
        }

        Ok(report)
    }
}
