use crate::OutputFormat;
use crate::commands::timers::{now_ms, paths};
use crate::config::Config;
use crate::state::Snapshot;
use crate::utils::render::{build_tree, views};
use anyhow::{Context, Result};

/// Print every timer with its progress at the current instant.
pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let paths = paths(config)?;
    // Read-only: a slightly stale view is fine, no lock needed.
    let snapshot = Snapshot::load(&paths)?;
    let now = now_ms();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&views(&snapshot.collection, now))
                .context("Failed to serialize timers")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if snapshot.collection.is_empty() {
                println!("No timers yet.");
                println!("   Add one with: grind new <SECTION> <TIMER> --hours 1");
                return Ok(());
            }
            println!(
                "{}",
                build_tree(&snapshot.collection, now, config.display.bar_width)
            );
        }
    }

    Ok(())
}
