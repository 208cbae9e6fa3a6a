use crate::config::{Config, config_path, set_key};
use anyhow::{Context, Result};
use std::fs;

pub fn list(config: &Config) -> Result<()> {
    let toml_str =
        toml::to_string_pretty(&config.redacted()).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    let value = serde_json::to_value(config.redacted()).context("Failed to serialize config")?;

    // Dot notation: "store.dataset"
    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", part))?;
    }

    match current {
        serde_json::Value::String(s) => println!("{}", s),
        serde_json::Value::Null => println!("(not set)"),
        v => println!("{}", v),
    }

    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let path = config_path()?;
    let existing = if path.exists() {
        fs::read_to_string(&path).context("Failed to read config file")?
    } else {
        String::new()
    };

    let updated = set_key(&existing, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, updated).context("Failed to write config file")?;

    println!("✓ Set {} in {}", key, path.display());
    Ok(())
}
