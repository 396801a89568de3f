//! Reminder scheduler: polls note state and raises at most one alert.
//!
//! # Responsibility
//! - Detect due reminders on a fixed-period poll and arm a single alert.
//! - Process dismiss/snooze commands against the armed alert.
//! - Own the poll worker thread and its immediate, idempotent shutdown.
//!
//! # Invariants
//! - State machine is `IDLE -> ALERTING -> IDLE`; a poll that lands while
//!   `ALERTING` is a no-op, not a queued retry.
//! - A reminder is eligible only inside the trailing due window
//!   `(now - 60s, now]`; older reminders are missed, never retroactively
//!   raised.
//! - The scheduler never surfaces an error to its caller: malformed
//!   reminders are skipped, delivery failures are swallowed, poisoned
//!   locks are recovered.

pub mod notify;

pub use notify::{LogNotifier, Notifier};

use crate::clock::Clock;
use crate::model::note::{Note, NoteId};
use crate::store::NoteStore;
use crate::timeutil::MINUTE_MS;
use log::{error, info, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Fixed poll period.
pub const POLL_PERIOD_MS: u64 = 5_000;

/// Trailing window inside which a due reminder is still eligible; a tick
/// delayed past it treats the reminder as missed.
pub const DUE_WINDOW_MS: i64 = 60 * 1_000;

const REMINDER_TITLE: &str = "NoteMinder Reminder";

/// The armed alert: a snapshot of the note that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlert {
    pub note_id: NoteId,
    pub content: String,
    /// Poll instant (epoch ms) at which the alert was armed.
    pub armed_at: i64,
}

/// Selects the note an idle poll should alert on, or `None`.
///
/// First match in collection iteration order wins. The rule is isolated
/// here so a priority-by-time policy would be a one-function swap.
pub fn find_due_note(notes: &[Note], now_ms: i64) -> Option<&Note> {
    notes.iter().find(|note| {
        note.is_reminder_on
            && matches!(
                note.reminder_time,
                Some(due) if now_ms - DUE_WINDOW_MS < due && due <= now_ms
            )
    })
}

struct SchedulerShared {
    store: Arc<Mutex<NoteStore>>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    alert: Mutex<Option<ActiveAlert>>,
}

impl SchedulerShared {
    /// One poll tick: arm an alert if idle and a reminder is due.
    fn poll_once(&self) {
        let mut alert = lock_or_recover(&self.alert);
        if alert.is_some() {
            return;
        }

        let now = self.clock.now_ms();
        let armed = {
            let store = lock_or_recover(&self.store);
            find_due_note(store.notes(), now).map(|note| ActiveAlert {
                note_id: note.id,
                content: note.content.clone(),
                armed_at: now,
            })
        };

        if let Some(armed) = armed {
            info!(
                "event=reminder_armed module=sched status=ok note={} armed_at={}",
                armed.note_id, armed.armed_at
            );
            self.notifier.notify(REMINDER_TITLE, &armed.content);
            *alert = Some(armed);
        }
    }
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Single-alert reminder scheduler over a shared [`NoteStore`].
pub struct ReminderScheduler {
    shared: Arc<SchedulerShared>,
    worker: Option<Worker>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<Mutex<NoteStore>>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            shared: Arc::new(SchedulerShared {
                store,
                clock,
                notifier,
                alert: Mutex::new(None),
            }),
            worker: None,
        }
    }

    /// Runs one poll tick synchronously.
    ///
    /// The worker thread calls this on its period; tests and cooperative
    /// hosts can drive it directly.
    pub fn poll_once(&self) {
        self.shared.poll_once();
    }

    /// The armed alert, if the scheduler is in `ALERTING`.
    pub fn active_alert(&self) -> Option<ActiveAlert> {
        lock_or_recover(&self.shared.alert).clone()
    }

    /// Dismisses the armed alert, turning the note's reminder off.
    ///
    /// No-op while idle; a note deleted since arming just clears the alert.
    pub fn dismiss(&self) {
        let mut alert = lock_or_recover(&self.shared.alert);
        let Some(active) = alert.take() else {
            return;
        };
        let mut store = lock_or_recover(&self.shared.store);
        if store.dismiss_reminder(active.note_id).is_err() {
            warn!(
                "event=reminder_dismiss module=sched status=degraded note={} reason=note_missing",
                active.note_id
            );
        }
    }

    /// Snoozes the armed alert for `minutes`, keeping the reminder on.
    ///
    /// The note becomes re-eligible once the new reminder instant enters
    /// the due window. No-op while idle.
    pub fn snooze(&self, minutes: i64) {
        let mut alert = lock_or_recover(&self.shared.alert);
        let Some(active) = alert.take() else {
            return;
        };
        let until = self.shared.clock.now_ms() + minutes * MINUTE_MS;
        let mut store = lock_or_recover(&self.shared.store);
        if store.snooze_reminder(active.note_id, until).is_err() {
            warn!(
                "event=reminder_snooze module=sched status=degraded note={} reason=note_missing",
                active.note_id
            );
        }
    }

    /// Spawns the poll worker; a second call while running is a no-op.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("reminder-scheduler".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(Duration::from_millis(POLL_PERIOD_MS)) {
                    Err(RecvTimeoutError::Timeout) => shared.poll_once(),
                    // Stop request, or the scheduler itself was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            });

        match spawned {
            Ok(handle) => {
                info!("event=sched_start module=sched status=ok period_ms={POLL_PERIOD_MS}");
                self.worker = Some(Worker { stop_tx, handle });
            }
            Err(err) => {
                error!("event=sched_start module=sched status=error error={err}");
            }
        }
    }

    /// Stops the poll worker immediately; idempotent.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.stop_tx.send(());
        if worker.handle.join().is_err() {
            warn!("event=sched_stop module=sched status=degraded reason=worker_panicked");
        } else {
            info!("event=sched_stop module=sched status=ok");
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
