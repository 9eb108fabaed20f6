use crate::config::Config;
use crate::error::TimerError;
use crate::notify::{MutedNotifier, Notifier};
use crate::state::{StatePaths, with_state_lock};
use crate::timer::store;
use crate::timer::duration::format_duration;
use crate::timer::{Collection, DurationParts, Timer};
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn paths(config: &Config) -> Result<StatePaths> {
    StatePaths::resolve(config.state.state_dir_override.as_ref())
}

/// Apply one store transform to the persisted collection under the lock.
///
/// The new collection replaces the stored one only when the transform
/// succeeds; on error nothing is written.
pub fn apply<F>(config: &Config, transform: F) -> Result<Collection>
where
    F: FnOnce(&Collection, &mut dyn Notifier) -> Result<Collection, TimerError>,
{
    let paths = paths(config)?;
    with_state_lock(&paths, |snapshot| {
        let next = if config.notifications.enabled {
            transform(&snapshot.collection, &mut snapshot.alerts)?
        } else {
            transform(&snapshot.collection, &mut MutedNotifier(&mut snapshot.alerts))?
        };
        snapshot.collection = next.clone();
        Ok(next)
    })
}

fn local_time(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

fn report(verb: &str, section: &str, timer: &Timer) {
    println!(
        "✓ {} {} / {} ({}), done at {}",
        verb,
        section,
        timer.name,
        format_duration(timer.duration),
        local_time(timer.end_time)
    );
}

pub fn new_section(config: &Config, section: &str, timer: &str, span: DurationParts) -> Result<()> {
    let now = now_ms();
    let collection = apply(config, |c, n| {
        if c.find_section(section.trim()).is_some() {
            warn!(section, "a section with this name already exists");
        }
        store::add_timer_to_new_section(c, section, timer, span, now, n)
    })?;

    if let Some(added) = collection.sections.last() {
        info!(id = added.id, "section created");
        report("Added", &added.name, &added.timers[0]);
    }
    Ok(())
}

pub fn add(config: &Config, section: &str, timer: &str, span: DurationParts) -> Result<()> {
    let now = now_ms();
    let collection = apply(config, |c, n| {
        store::add_timer_to_existing_section(c, section, timer, span, now, n)
    })?;

    let added = collection
        .find_section(section.trim())
        .map(|i| &collection.sections[i])
        .and_then(|s| s.timers.last().map(|t| (s, t)));
    if let Some((s, t)) = added {
        report("Added", &s.name, t);
    }
    Ok(())
}

pub fn update(
    config: &Config,
    section_index: usize,
    timer_index: usize,
    timer: &str,
    span: DurationParts,
) -> Result<()> {
    let now = now_ms();
    let collection = apply(config, |c, n| {
        store::update_timer(c, section_index, timer_index, timer, span, now, n)
    })?;

    let section = &collection.sections[section_index];
    report("Updated", &section.name, &section.timers[timer_index]);
    Ok(())
}

pub fn restart(config: &Config, section_index: usize, timer_index: usize) -> Result<()> {
    let now = now_ms();
    let collection = apply(config, |c, n| {
        store::restart_timer(c, section_index, timer_index, now, n)
    })?;

    let section = &collection.sections[section_index];
    report("Restarted", &section.name, &section.timers[timer_index]);
    Ok(())
}

pub fn delete(config: &Config, section_index: usize, timer_index: usize) -> Result<()> {
    let mut removed = None;
    let collection = apply(config, |c, n| {
        removed = c.sections.get(section_index).and_then(|s| {
            s.timers
                .get(timer_index)
                .map(|t| (s.name.clone(), t.name.clone(), s.timers.len() == 1))
        });
        store::delete_timer(c, section_index, timer_index, n)
    })?;

    if let Some((section, timer, last)) = removed {
        println!("✓ Deleted {} / {}", section, timer);
        if last {
            println!("  Section '{}' is now empty and was removed", section);
        }
    }
    println!("{} timer(s) left", collection.timer_count());
    Ok(())
}
