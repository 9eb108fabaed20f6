//! Notification gateway: fire-once alerts correlated with timers.

pub mod desktop;
pub mod queue;

use crate::timer::models::NotificationId;
use anyhow::Result;

pub use desktop::DesktopDelivery;
pub use queue::{AlertQueue, PendingAlert};

/// Schedules and cancels alerts for timer completion.
pub trait Notifier {
    /// Arrange a single alert at `fires_at_ms`.
    ///
    /// Returns `None` when this notifier does not track alerts, in which case
    /// the timer carries no handle.
    fn schedule(&mut self, title: &str, body: &str, fires_at_ms: i64)
        -> Result<Option<NotificationId>>;

    fn cancel(&mut self, id: &NotificationId) -> Result<()>;
}

/// Notifier for setups with alerts turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn schedule(&mut self, _title: &str, _body: &str, _fires_at_ms: i64)
        -> Result<Option<NotificationId>> {
        Ok(None)
    }

    fn cancel(&mut self, _id: &NotificationId) -> Result<()> {
        Ok(())
    }
}

/// Wraps a notifier so existing alerts can still be cancelled while no new
/// ones are scheduled.
pub struct MutedNotifier<'a, N: Notifier>(pub &'a mut N);

impl<N: Notifier> Notifier for MutedNotifier<'_, N> {
    fn schedule(&mut self, _title: &str, _body: &str, _fires_at_ms: i64)
        -> Result<Option<NotificationId>> {
        Ok(None)
    }

    fn cancel(&mut self, id: &NotificationId) -> Result<()> {
        self.0.cancel(id)
    }
}

/// Alert title and body for a timer in a section.
pub fn alert_text(section: &str, timer: &str) -> (String, String) {
    (section.to_string(), format!("{} is done", timer))
}
