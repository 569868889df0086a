// src/config/models.rs
use crate::health::{PayloadClassifier, ResponseClassifier, StatusClassifier};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Required environment variable {0} is missing or empty")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to assemble configuration: {0}")]
    Source(#[from] ::config::ConfigError),
}

/// How a 200 response is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Status code only.
    #[default]
    Status,
    /// Status code plus a `{"status": "OK", "message": ...}` body.
    Payload,
}

impl CheckMode {
    /// Fixed pause between checks. Not configurable from the environment.
    pub fn interval(&self) -> Duration {
        match self {
            CheckMode::Status => Duration::from_secs(5 * 60),
            CheckMode::Payload => Duration::from_secs(60),
        }
    }

    pub fn classifier(&self) -> Arc<dyn ResponseClassifier> {
        match self {
            CheckMode::Status => Arc::new(StatusClassifier),
            CheckMode::Payload => Arc::new(PayloadClassifier),
        }
    }
}

impl FromStr for CheckMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(CheckMode::Status),
            "payload" => Ok(CheckMode::Payload),
            other => Err(format!("expected `status` or `payload`, got `{}`", other)),
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckMode::Status => write!(f, "status"),
            CheckMode::Payload => write!(f, "payload"),
        }
    }
}

/// Immutable monitor configuration, built once at startup.
#[derive(Clone)]
pub struct MonitorConfig {
    pub api_url: String,
    pub telegram_bot: String,
    pub telegram_chat: String,
    pub mode: CheckMode,
    pub check_timeout_secs: Option<u64>,
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        self.mode.interval()
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_secs.map(Duration::from_secs)
    }
}

// The bot token is a credential; keep it out of debug output.
impl fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("api_url", &self.api_url)
            .field("telegram_bot", &"<redacted>")
            .field("telegram_chat", &self.telegram_chat)
            .field("mode", &self.mode)
            .field("check_timeout_secs", &self.check_timeout_secs)
            .finish()
    }
}

/// Raw values as they come out of the layered sources, before validation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSettings {
    pub api_url: Option<String>,
    pub telegram_bot: Option<String>,
    pub telegram_chat: Option<String>,
    pub health_check_mode: Option<String>,
    pub check_timeout_secs: Option<String>,
}

impl RawSettings {
    pub(crate) fn validate(self) -> Result<MonitorConfig, ConfigError> {
        let api_url = required("API_URL", self.api_url)?;
        let telegram_bot = required("TELEGRAM_BOT", self.telegram_bot)?;
        let telegram_chat = required("TELEGRAM_CHAT", self.telegram_chat)?;

        let mode = match non_blank(self.health_check_mode) {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                var: "HEALTH_CHECK_MODE",
                value,
                reason,
            })?,
            None => CheckMode::default(),
        };

        let check_timeout_secs = match non_blank(self.check_timeout_secs) {
            Some(value) => Some(parse_timeout(value)?),
            None => None,
        };

        Ok(MonitorConfig {
            api_url,
            telegram_bot,
            telegram_chat,
            mode,
            check_timeout_secs,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(var: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::Missing(var))
}

fn parse_timeout(value: String) -> Result<u64, ConfigError> {
    let parsed = value.trim().parse::<u64>();
    let reason = match parsed {
        Ok(0) => "timeout must be at least one second".to_string(),
        Ok(secs) => return Ok(secs),
        Err(e) => e.to_string(),
    };

    Err(ConfigError::Invalid {
        var: "CHECK_TIMEOUT_SECS",
        value,
        reason,
    })
}
