use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_DIR_NAME: &str = ".repbook";
pub const STORE_TOKEN_ENV: &str = "SANITY_API_TOKEN";
pub const IDENTITY_SECRET_ENV: &str = "CLERK_SECRET_KEY";

const REDACTED: &str = "********";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Move plain-text secrets into the OS keyring on load
    #[serde(default = "default_true")]
    pub use_keyring: bool,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub state: StateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_keyring: true,
            store: StoreConfig::default(),
            identity: IdentityConfig::default(),
            state: StateConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub use_cdn: bool,
    /// Write token; can be omitted if stored in the keyring or env
    pub token: Option<String>,
    /// Optional API URL override for testing (e.g. mocking)
    pub api_url: Option<String>,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: false,
            token: None,
            api_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    pub secret_key: Option<String>,
    #[serde(default = "default_identity_url")]
    pub api_url: String,
}

fn default_identity_url() -> String {
    crate::identity::client::DEFAULT_API_URL.to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_url: default_identity_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.is_empty() {
            anyhow::bail!(
                "store.project_id is not set. Run 'repbook config set store.project_id <ID>'"
            );
        }
        if !self
            .project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            anyhow::bail!(
                "Invalid project id '{}': only a-z, 0-9 and '-' are allowed",
                self.project_id
            );
        }

        let dataset_ok = !self.dataset.is_empty()
            && self.dataset.len() <= 64
            && self
                .dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !dataset_ok {
            anyhow::bail!("Invalid dataset name '{}'", self.dataset);
        }

        let version = self.api_version.trim_start_matches('v');
        if version != "1" && version != "X" {
            chrono::NaiveDate::parse_from_str(version, "%Y-%m-%d").with_context(|| {
                format!(
                    "Invalid api_version '{}', expected YYYY-MM-DD",
                    self.api_version
                )
            })?;
        }

        Ok(())
    }
}

impl Config {
    /// Store write token: keyring, then config file, then environment
    pub fn store_token(&self) -> Option<String> {
        if self.use_keyring {
            if let Ok(token) = crate::keyring::get_store_token() {
                return Some(token);
            }
        }
        self.store
            .token
            .clone()
            .or_else(|| std::env::var(STORE_TOKEN_ENV).ok())
            .filter(|t| !t.is_empty())
    }

    /// Identity backend secret: keyring, then config file, then environment
    pub fn identity_secret(&self) -> Option<String> {
        if self.use_keyring {
            if let Ok(secret) = crate::keyring::get_identity_secret() {
                return Some(secret);
            }
        }
        self.identity
            .secret_key
            .clone()
            .or_else(|| std::env::var(IDENTITY_SECRET_ENV).ok())
            .filter(|s| !s.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        self.store.validate()
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Config {
        let mut copy = self.clone();
        if copy.store.token.is_some() {
            copy.store.token = Some(REDACTED.to_string());
        }
        if copy.identity.secret_key.is_some() {
            copy.identity.secret_key = Some(REDACTED.to_string());
        }
        copy
    }

    /// Move plain-text secrets into the keyring
    pub fn migrate_credentials(&mut self) -> Result<bool> {
        if !self.use_keyring {
            return Ok(false);
        }

        let mut migrated = false;

        if let Some(token) = &self.store.token {
            crate::keyring::store_store_token(token)
                .context("Failed to store write token in keyring")?;
            self.store.token = None;
            migrated = true;
        }

        if let Some(secret) = &self.identity.secret_key {
            crate::keyring::store_identity_secret(secret)
                .context("Failed to store identity secret in keyring")?;
            self.identity.secret_key = None;
            migrated = true;
        }

        Ok(migrated)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(CONFIG_DIR_NAME)
        .join("config.toml"))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    loader
        .try_deserialize()
        .context("Failed to parse config file")
}

/// Load `~/.repbook/config.toml`. Store settings are validated by the commands that use them.
pub fn load() -> Result<Config> {
    let config_path = config_path()?;

    if !config_path.exists() {
        warn_missing();
        return Ok(Config::default());
    }

    let mut config = load_from_path(&config_path)
        .with_context(|| format!("Invalid config at {}", config_path.display()))?;

    if config.migrate_credentials()? {
        info!("migrated credentials to secure storage");
        save_to_path(&config, &config_path)?;
    }

    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}

fn parse_scalar(value: &str) -> toml::Value {
    if let Ok(b) = value.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = value.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    toml::Value::String(value.to_string())
}

/// Set a dotted key (e.g. `store.dataset`) in a TOML document.
///
/// Intermediate tables are created as needed. Comments are not preserved.
pub fn set_key(content: &str, key: &str, value: &str) -> Result<String> {
    let mut root: toml::Table = if content.trim().is_empty() {
        toml::Table::new()
    } else {
        content.parse().context("Failed to parse existing config")?
    };

    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("Invalid key '{}'", key);
    }
    let (leaf, tables) = parts
        .split_last()
        .context("Key must not be empty")?;

    let mut current = &mut root;
    for part in tables {
        let entry = current
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::Table::new()));
        current = match entry {
            toml::Value::Table(t) => t,
            _ => anyhow::bail!("'{}' is not a table", part),
        };
    }

    // Values typed as strings in Config stay strings even when they look numeric
    let string_keys = ["store.project_id", "store.dataset", "store.api_version"];
    let parsed = if string_keys.contains(&key) {
        toml::Value::String(value.to_string())
    } else {
        parse_scalar(value)
    };
    current.insert(leaf.to_string(), parsed);

    toml::to_string_pretty(&root).context("Failed to serialize config")
}

pub fn warn_missing() {
    warn!("no config found, run 'repbook config set store.project_id <ID>'");
}
