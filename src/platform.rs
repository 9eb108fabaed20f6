//! Where grind-timer keeps its files.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const APP_DIR: &str = ".grind-timer";

/// Candidate state directories, most preferred first: `~/.grind-timer`,
/// the platform data directory, then `./.grind-timer`.
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);
    candidates.extend(home::home_dir().map(|home| home.join(APP_DIR)));
    candidates.extend(dirs::data_local_dir().map(|data| data.join("grind-timer")));
    candidates.push(PathBuf::from(APP_DIR));
    candidates
}

/// First writable directory: the override when given, otherwise the first
/// usable entry of [`candidate_dirs`].
pub fn get_state_dir(override_dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.clone());
    }

    candidate_dirs()
        .into_iter()
        .find(|dir| match ensure_writable(dir) {
            Ok(()) => true,
            Err(e) => {
                warn!("{:#}, trying next location", e);
                false
            }
        })
        .context(
            "No writable state directory. \
             Check file permissions or set state.state_dir_override in config.",
        )
}

/// Create `dir` if needed and check that a new file can be created in it.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let marker = dir.join(format!(".write_test.{}", std::process::id()));
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&marker)
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;
    let _ = fs::remove_file(&marker);

    Ok(())
}

/// Location of `config.toml`.
pub fn config_path() -> Result<PathBuf> {
    let home = home::home_dir().context("Could not find home directory")?;
    Ok(home.join(APP_DIR).join("config.toml"))
}
