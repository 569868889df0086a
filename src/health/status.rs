// src/health/status.rs
use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    BadStatus,
    MalformedPayload,
    UnhealthyPayload,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unreachable => "unreachable",
            FailureKind::BadStatus => "bad status",
            FailureKind::MalformedPayload => "malformed payload",
            FailureKind::UnhealthyPayload => "unhealthy payload",
        };
        f.write_str(name)
    }
}

/// Why a single check did not pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckFailure {
    #[error("Failed to reach API: {0}")]
    Unreachable(String),

    #[error("API Error: {status}, Response: {body}")]
    BadStatus { status: StatusCode, body: String },

    #[error("Malformed health payload: {0}")]
    MalformedPayload(String),

    #[error("API reported status {status:?}: {message}")]
    UnhealthyPayload { status: String, message: String },
}

impl CheckFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            CheckFailure::Unreachable(_) => FailureKind::Unreachable,
            CheckFailure::BadStatus { .. } => FailureKind::BadStatus,
            CheckFailure::MalformedPayload(_) => FailureKind::MalformedPayload,
            CheckFailure::UnhealthyPayload { .. } => FailureKind::UnhealthyPayload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HealthOutcome {
    Healthy,
    Failed(CheckFailure),
}

impl HealthOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthOutcome::Healthy)
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            HealthOutcome::Healthy => None,
            HealthOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl From<Result<(), CheckFailure>> for HealthOutcome {
    fn from(result: Result<(), CheckFailure>) -> Self {
        match result {
            Ok(()) => HealthOutcome::Healthy,
            Err(failure) => HealthOutcome::Failed(failure),
        }
    }
}
