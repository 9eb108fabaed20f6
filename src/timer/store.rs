//! Pure transforms over a [`Collection`].
//!
//! Every operation takes the current collection by reference and returns a
//! new one; the input is never touched. All checks run before the notifier
//! is called, so a rejected operation leaves no alert behind. When a timer is
//! re-armed or removed, its previous alert is cancelled before a replacement
//! is scheduled.

use crate::error::{TimerError, ValidationError};
use crate::notify::{Notifier, alert_text};
use crate::timer::duration::DurationParts;
use crate::timer::models::{Collection, Section, Timer, duration_as_i64};
use tracing::debug;

pub type StoreResult = Result<Collection, TimerError>;

/// Append a new section holding a single timer.
pub fn add_timer_to_new_section(
    collection: &Collection,
    section_name: &str,
    timer_name: &str,
    span: DurationParts,
    now_ms: i64,
    notifier: &mut dyn Notifier,
) -> StoreResult {
    let section_name = non_empty(section_name, ValidationError::EmptySectionName)?;
    let timer_name = non_empty(timer_name, ValidationError::EmptyTimerName)?;
    let duration = checked_duration(span)?;

    let id = collection
        .next_section_id()
        .ok_or(TimerError::SectionIdExhausted)?;
    let timer = arm(section_name, timer_name, duration, now_ms, notifier)?;

    let mut next = collection.clone();
    next.sections.push(Section {
        id,
        name: section_name.to_string(),
        timers: vec![timer],
    });
    debug!(section = id, name = section_name, "added section");
    Ok(next)
}

/// Append a timer to the first section named `section_name`.
pub fn add_timer_to_existing_section(
    collection: &Collection,
    section_name: &str,
    timer_name: &str,
    span: DurationParts,
    now_ms: i64,
    notifier: &mut dyn Notifier,
) -> StoreResult {
    let section_name = non_empty(section_name, ValidationError::EmptySectionName)?;
    let timer_name = non_empty(timer_name, ValidationError::EmptyTimerName)?;
    let duration = checked_duration(span)?;

    let index = collection
        .find_section(section_name)
        .ok_or_else(|| TimerError::SectionNotFound(section_name.to_string()))?;

    let timer = arm(section_name, timer_name, duration, now_ms, notifier)?;

    let mut next = collection.clone();
    next.sections[index].timers.push(timer);
    Ok(next)
}

/// Replace the timer at a position with a freshly armed one.
pub fn update_timer(
    collection: &Collection,
    section_index: usize,
    timer_index: usize,
    timer_name: &str,
    span: DurationParts,
    now_ms: i64,
    notifier: &mut dyn Notifier,
) -> StoreResult {
    let timer_name = non_empty(timer_name, ValidationError::EmptyTimerName)?;
    let duration = checked_duration(span)?;
    let (section, previous) = locate(collection, section_index, timer_index)?;

    if let Some(id) = &previous.notification_id {
        notifier.cancel(id)?;
    }
    let timer = arm(&section.name, timer_name, duration, now_ms, notifier)?;

    let mut next = collection.clone();
    next.sections[section_index].timers[timer_index] = timer;
    Ok(next)
}

/// Re-arm a timer with its current name and duration.
pub fn restart_timer(
    collection: &Collection,
    section_index: usize,
    timer_index: usize,
    now_ms: i64,
    notifier: &mut dyn Notifier,
) -> StoreResult {
    let (section, previous) = locate(collection, section_index, timer_index)?;

    if let Some(id) = &previous.notification_id {
        notifier.cancel(id)?;
    }
    let timer = arm(&section.name, &previous.name, previous.duration, now_ms, notifier)?;

    let mut next = collection.clone();
    next.sections[section_index].timers[timer_index] = timer;
    Ok(next)
}

/// Remove a timer, dropping its section when it was the last one.
pub fn delete_timer(
    collection: &Collection,
    section_index: usize,
    timer_index: usize,
    notifier: &mut dyn Notifier,
) -> StoreResult {
    let (_, previous) = locate(collection, section_index, timer_index)?;

    if let Some(id) = &previous.notification_id {
        notifier.cancel(id)?;
    }

    let mut next = collection.clone();
    let timers = &mut next.sections[section_index].timers;
    timers.remove(timer_index);
    if timers.is_empty() {
        let removed = next.sections.remove(section_index);
        debug!(section = removed.id, name = %removed.name, "removed empty section");
    }
    Ok(next)
}

fn non_empty(value: &str, err: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed)
}

fn checked_duration(span: DurationParts) -> Result<u64, ValidationError> {
    let duration = span.to_millis();
    if duration == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    Ok(duration)
}

fn locate(
    collection: &Collection,
    section_index: usize,
    timer_index: usize,
) -> Result<(&Section, &Timer), TimerError> {
    let section = collection
        .sections
        .get(section_index)
        .ok_or(TimerError::SectionIndex {
            index: section_index,
            len: collection.len(),
        })?;
    let timer = section.timers.get(timer_index).ok_or(TimerError::TimerIndex {
        section: section_index,
        index: timer_index,
        len: section.timers.len(),
    })?;
    Ok((section, timer))
}

fn arm(
    section_name: &str,
    timer_name: &str,
    duration: u64,
    now_ms: i64,
    notifier: &mut dyn Notifier,
) -> Result<Timer, TimerError> {
    let end_time = now_ms.saturating_add(duration_as_i64(duration));
    let (title, body) = alert_text(section_name, timer_name);
    let notification_id = notifier.schedule(&title, &body, end_time)?;

    Ok(Timer {
        name: timer_name.to_string(),
        duration,
        end_time,
        notification_id,
    })
}
