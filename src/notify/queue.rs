use super::Notifier;
use crate::timer::models::NotificationId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAlert {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub fires_at: i64,
}

/// Persisted list of alerts waiting to fire.
///
/// Delivery happens elsewhere (`grind watch`); this only keeps the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQueue {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub pending: Vec<PendingAlert>,
}

impl AlertQueue {
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.pending.iter().any(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every alert due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<PendingAlert> {
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|a| a.fires_at <= now_ms);
        self.pending = rest;
        due.sort_by_key(|a| a.fires_at);
        due
    }
}

impl Notifier for AlertQueue {
    fn schedule(&mut self, title: &str, body: &str, fires_at_ms: i64)
        -> Result<Option<NotificationId>> {
        self.next_id += 1;
        let id = NotificationId(format!("alert-{}", self.next_id));
        debug!(%id, fires_at = fires_at_ms, "scheduled alert");
        self.pending.push(PendingAlert {
            id: id.clone(),
            title: title.to_string(),
            body: body.to_string(),
            fires_at: fires_at_ms,
        });
        Ok(Some(id))
    }

    fn cancel(&mut self, id: &NotificationId) -> Result<()> {
        let before = self.pending.len();
        self.pending.retain(|a| &a.id != id);
        if self.pending.len() == before {
            // Already delivered or never queued.
            debug!(%id, "cancel of unknown alert ignored");
        } else {
            debug!(%id, "cancelled alert");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let mut queue = AlertQueue::default();
        let a = queue.schedule("t", "b", 10).unwrap().unwrap();
        queue.cancel(&a).unwrap();
        let b = queue.schedule("t", "b", 10).unwrap().unwrap();

        assert_eq!(a.0, "alert-1");
        assert_eq!(b.0, "alert-2");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_cancel_unknown_is_noop() {
        let mut queue = AlertQueue::default();
        queue.schedule("t", "b", 10).unwrap();
        queue
            .cancel(&NotificationId("alert-99".to_string()))
            .unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_take_due_orders_by_fire_time() {
        let mut queue = AlertQueue::default();
        queue.schedule("late", "", 300).unwrap();
        queue.schedule("future", "", 1_000).unwrap();
        queue.schedule("early", "", 100).unwrap();

        let due = queue.take_due(500);
        let titles: Vec<&str> = due.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending[0].title, "future");
    }
}
