// src/health/mod.rs
mod checker;
mod classifier;
mod status;

pub use checker::HealthChecker;
pub use classifier::{HealthPayload, PayloadClassifier, ResponseClassifier, StatusClassifier};
pub use status::{CheckFailure, FailureKind, HealthOutcome};
