use crate::config::{self, Config};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Look up a dotted key such as `display.bar_width`.
pub fn lookup(config: &Config, key: &str) -> Result<Value> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    Ok(current.clone())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(config, key)? {
        Value::String(s) => println!("{}", s),
        Value::Null => println!("(unset)"),
        v => println!("{}", v),
    }
    Ok(())
}

/// Return a copy of `config` with `key` set to `raw`.
///
/// `raw` is read as JSON when it parses (`true`, `40`) and as a plain string
/// otherwise. The result must still deserialize and validate.
pub fn with_value(config: &Config, key: &str, raw: &str) -> Result<Config> {
    let mut root = serde_json::to_value(config).context("Failed to serialize config")?;
    let parsed = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut parts = key.split('.').peekable();
    let mut current = &mut root;
    while let Some(part) = parts.next() {
        let obj = current
            .as_object_mut()
            .with_context(|| format!("Key not found: {}", key))?;
        if parts.peek().is_none() {
            if !obj.contains_key(part) {
                anyhow::bail!("Key not found: {}", key);
            }
            obj.insert(part.to_string(), parsed);
            break;
        }
        current = obj
            .get_mut(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }

    let updated: Config = serde_json::from_value(root)
        .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
    updated.validate()?;
    Ok(updated)
}

pub fn set_in(path: &Path, key: &str, value: &str) -> Result<()> {
    let current = config::load_file_only(path)?;
    let updated = with_value(&current, key, value)?;
    config::save_to_path(&updated, path)?;
    println!("✓ {} = {}", key, value);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let path = crate::platform::config_path()?;
    set_in(&path, key, value)
}
