use crate::notify::AlertQueue;
use crate::timer::Collection;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of the persisted files inside the state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub lock: PathBuf,
    pub timers: PathBuf,
    pub alerts: PathBuf,
}

impl StatePaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            lock: dir.join("state.lock"),
            timers: dir.join("timers.json"),
            alerts: dir.join("alerts.json"),
        }
    }

    /// Paths inside the override directory, or the first writable default.
    pub fn resolve(state_dir_override: Option<&PathBuf>) -> Result<Self> {
        Ok(Self::in_dir(crate::platform::get_state_dir(state_dir_override)?))
    }
}

/// Everything read and written together under the lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub collection: Collection,
    pub alerts: AlertQueue,
}

impl Snapshot {
    pub fn load(paths: &StatePaths) -> Result<Self> {
        Ok(Self {
            collection: load_json(&paths.timers).context("Failed to load timers")?,
            alerts: load_json(&paths.alerts).context("Failed to load alerts")?,
        })
    }

    pub fn save(&self, paths: &StatePaths) -> Result<()> {
        save_json(&self.collection, &paths.timers).context("Failed to save timers")?;
        save_json(&self.alerts, &paths.alerts).context("Failed to save alerts")?;
        Ok(())
    }
}

/// Read a JSON file, treating a missing or blank file as the default value.
pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn save_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let content = serde_json::to_string_pretty(value).context("Failed to serialize state")?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write then rename so a crash never leaves a truncated file behind.
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    debug!(path = %path.display(), "saved");
    Ok(())
}

/// Run `f` against the persisted snapshot while holding an exclusive lock.
///
/// The snapshot is written back only if `f` succeeds.
pub fn with_state_lock<F, R>(paths: &StatePaths, f: F) -> Result<R>
where
    F: FnOnce(&mut Snapshot) -> Result<R>,
{
    if let Some(parent) = paths.lock.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&paths.lock)
        .context("Failed to open lock file")?;

    file.lock_exclusive().context("Failed to acquire lock")?;

    let mut snapshot = Snapshot::load(paths)?;

    let result = f(&mut snapshot);

    if result.is_ok() {
        snapshot.save(paths)?;
    }

    file.unlock().context("Failed to unlock")?;

    result
}
