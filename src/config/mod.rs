// src/config/mod.rs
mod models;

pub use models::*;

use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables the monitor understands.
const KNOWN_VARS: [&str; 5] = [
    "API_URL",
    "TELEGRAM_BOT",
    "TELEGRAM_CHAT",
    "HEALTH_CHECK_MODE",
    "CHECK_TIMEOUT_SECS",
];

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Builds a [`MonitorConfig`] from an env file layered under the process
/// environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_file: PathBuf,
    env_file_required: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            env_file_required: false,
        }
    }

    pub fn with_env_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.env_file = path.as_ref().to_path_buf();
        self
    }

    /// Fail the load when the env file does not exist.
    pub fn require_env_file(mut self) -> Self {
        self.env_file_required = true;
        self
    }

    /// Load from the env file and the current process environment.
    pub fn load(&self) -> Result<MonitorConfig, ConfigError> {
        self.load_from(std::env::vars())
    }

    /// Load from the env file and an explicit set of process variables.
    /// Process variables win over env file entries.
    pub fn load_from<I>(&self, vars: I) -> Result<MonitorConfig, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut builder = ::config::Config::builder();

        for (key, value) in self.read_env_file()? {
            builder = builder.set_default(key, value)?;
        }

        for (key, value) in vars {
            if let Some(key) = settings_key(&key) {
                builder = builder.set_override(key, value)?;
            }
        }

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        raw.validate()
    }

    fn read_env_file(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let path = &self.env_file;
        let shown = path.display().to_string();

        if !self.env_file_required && !path.exists() {
            debug!("No env file at {}, using process environment only", shown);
            return Ok(Vec::new());
        }

        let iter = dotenvy::from_path_iter(path).map_err(|source| ConfigError::EnvFile {
            path: shown.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                path: shown.clone(),
                source,
            })?;
            if let Some(key) = settings_key(&key) {
                entries.push((key, value));
            }
        }

        debug!("Loaded {} known entries from {}", entries.len(), shown);
        Ok(entries)
    }
}

/// Map an environment variable name to its settings key, ignoring anything
/// the monitor does not read.
fn settings_key(var: &str) -> Option<String> {
    KNOWN_VARS
        .iter()
        .find(|known| **known == var)
        .map(|known| known.to_ascii_lowercase())
}
