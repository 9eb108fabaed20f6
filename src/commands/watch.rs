use crate::commands::timers::{now_ms, paths};
use crate::config::Config;
use crate::notify::DesktopDelivery;
use crate::state::with_state_lock;
use crate::utils::render::build_tree;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Refresh progress periodically and deliver alerts as they come due.
pub async fn watch(config: &Config, interval_secs: Option<u64>, once: bool) -> Result<()> {
    let secs = interval_secs.unwrap_or(config.display.refresh_secs).max(1);
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    let delivery = DesktopDelivery;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                refresh(config, &delivery, !once)?;
                if once {
                    return Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                println!();
                return Ok(());
            }
        }
    }
}

fn refresh(config: &Config, delivery: &DesktopDelivery, clear: bool) -> Result<()> {
    let paths = paths(config)?;
    let now = now_ms();

    let (collection, due) = with_state_lock(&paths, |snapshot| {
        let due = snapshot.alerts.take_due(now);
        Ok((snapshot.collection.clone(), due))
    })?;

    if clear {
        print!("{}", CLEAR_SCREEN);
    }
    if collection.is_empty() {
        println!("No timers yet.");
    } else {
        println!("{}", build_tree(&collection, now, config.display.bar_width));
    }

    if !config.notifications.enabled {
        if !due.is_empty() {
            debug!(count = due.len(), "notifications disabled, dropping due alerts");
        }
        return Ok(());
    }
    for alert in &due {
        debug!(id = %alert.id, "delivering alert");
        delivery.deliver(alert);
        println!("⏰ {}: {}", alert.title, alert.body);
    }

    Ok(())
}
