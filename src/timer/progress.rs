use crate::timer::duration::{decode, format_duration};
use crate::timer::models::{Timer, duration_as_i64};
use serde::Serialize;

/// Remaining time at or below this counts as finished.
pub const DONE_THRESHOLD_MS: i64 = 1_000;

pub const DONE_LABEL: &str = "done";

/// Snapshot of a countdown at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Elapsed share of the duration, 0..=100.
    pub percent: u8,
    pub remaining_ms: i64,
    pub remaining_label: String,
    pub total_label: String,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.remaining_label == DONE_LABEL
    }
}

pub fn compute_progress(end_time: i64, duration: u64, now_ms: i64) -> Progress {
    let remaining_ms = end_time.saturating_sub(now_ms);

    let percent = if duration == 0 {
        100
    } else {
        let elapsed = duration_as_i64(duration).saturating_sub(remaining_ms);
        let raw = (elapsed as f64 / duration as f64 * 100.0).ceil();
        raw.clamp(0.0, 100.0) as u8
    };

    let remaining_label = if remaining_ms <= DONE_THRESHOLD_MS {
        DONE_LABEL.to_string()
    } else {
        decode(remaining_ms as u64).to_string()
    };

    Progress {
        percent,
        remaining_ms: remaining_ms.max(0),
        remaining_label,
        total_label: format_duration(duration),
    }
}

pub fn timer_progress(timer: &Timer, now_ms: i64) -> Progress {
    compute_progress(timer.end_time, timer.duration, now_ms)
}
