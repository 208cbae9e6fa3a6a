use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct State {
    pub version: String,
    pub session: Option<Session>,
    /// Last successful history fetch
    pub last_sync: Option<DateTime<Utc>>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            session: None,
            last_sync: None,
        }
    }
}

/// The signed-in user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub signed_in_at: DateTime<Utc>,
    /// Whether the user id was confirmed against the identity service
    pub verified: bool,
}

impl State {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read state file")?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).context("Failed to parse state JSON")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a temp file then rename so a crash never leaves a torn file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

/// Run `f` against the state while holding an exclusive lock; saves on success.
pub fn with_state_lock<F, R>(lock_path: &Path, state_path: &Path, f: F) -> Result<R>
where
    F: FnOnce(&mut State) -> Result<R>,
{
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(lock_path)
        .context("Failed to open lock file")?;

    file.lock_exclusive().context("Failed to acquire lock")?;

    let mut state = State::load(state_path)?;

    let result = f(&mut state);

    if result.is_ok() {
        state.save(state_path)?;
    }

    file.unlock().context("Failed to unlock")?;

    result
}
