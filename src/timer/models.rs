use serde::{Deserialize, Serialize};

/// Handle of an alert held by a notification gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single named countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub name: String,
    /// Total span in milliseconds.
    pub duration: u64,
    /// Completion instant, epoch milliseconds.
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<NotificationId>,
}

impl Timer {
    /// Epoch milliseconds at which the countdown was (re)armed.
    pub fn started_at(&self) -> i64 {
        self.end_time.saturating_sub(duration_as_i64(self.duration))
    }
}

/// Millisecond duration as a signed offset, capped at `i64::MAX`.
pub fn duration_as_i64(duration: u64) -> i64 {
    i64::try_from(duration).unwrap_or(i64::MAX)
}

/// A game (or any other category) grouping timers. Never empty while stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub name: String,
    pub timers: Vec<Timer>,
}

/// The whole persisted state: sections in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    pub sections: Vec<Section>,
}

impl Collection {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Id for the next section: one past the largest id in use.
    ///
    /// `None` once the largest id is `u32::MAX`; ids are never reused.
    pub fn next_section_id(&self) -> Option<u32> {
        self.sections.iter().map(|s| s.id).max().unwrap_or(0).checked_add(1)
    }

    pub fn find_section(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    pub fn timer_count(&self) -> usize {
        self.sections.iter().map(|s| s.timers.len()).sum()
    }
}
