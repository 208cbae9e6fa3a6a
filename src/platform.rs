//! Cross-platform utilities for directory resolution and file operations.
//!
//! State directory resolution tries a chain of locations so the CLI keeps
//! working on machines where the home directory is read-only.

use crate::config::CONFIG_DIR_NAME;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const APP_DIR_NAME: &str = "repbook";

/// Get the state directory with cross-platform fallback chain.
///
/// Priority order:
/// 1. Explicit override (for testing/CI)
/// 2. Home directory (~/.repbook)
/// 3. Platform-specific data directory (XDG on Linux, AppData on Windows)
/// 4. Current working directory (last resort)
///
/// Each directory is validated for write access before being selected.
pub fn get_state_dir(override_dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.clone());
    }

    if let Some(home) = home::home_dir() {
        let dir = home.join(CONFIG_DIR_NAME);
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
        warn!(dir = %dir.display(), "state directory not writable, trying fallbacks");
    }

    if let Some(data) = dirs::data_local_dir() {
        let dir = data.join(APP_DIR_NAME);
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
    }

    let dir = PathBuf::from(CONFIG_DIR_NAME);
    ensure_writable(&dir).context(
        "Cannot create state directory in any location. \
         Check file permissions or set state.state_dir_override in config.",
    )?;
    Ok(dir)
}

/// Ensure a directory exists and is writable by the current user.
pub fn ensure_writable(dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_path = dir.join(".write_test");
    fs::write(&test_path, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;

    // Ignore errors: antivirus on Windows may still hold the file
    let _ = fs::remove_file(&test_path);

    Ok(())
}

/// Lock file and state JSON paths, respecting the config override.
pub fn state_paths(state_dir_override: Option<&PathBuf>) -> Result<(PathBuf, PathBuf)> {
    let state_dir = get_state_dir(state_dir_override)?;
    Ok((state_dir.join("state.lock"), state_dir.join("state.json")))
}
