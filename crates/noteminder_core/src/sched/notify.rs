//! Notification delivery boundary.
//!
//! Delivery is best-effort: implementations absorb their own failures, and
//! the scheduler never lets a delivery problem touch its state machine.

use log::info;

/// User-visible notification sink.
pub trait Notifier: Send + Sync {
    /// Fire-and-forget delivery; implementations must not panic.
    fn notify(&self, title: &str, body: &str);
}

/// Default sink that records the notification as a log event.
///
/// Useful for headless hosts and as the fallback when no platform channel
/// is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(
            "event=notify module=sched status=ok title={} body_chars={}",
            title,
            body.chars().count()
        );
    }
}
