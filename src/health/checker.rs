// src/health/checker.rs
use super::classifier::ResponseClassifier;
use super::status::{CheckFailure, HealthOutcome};
use crate::config::MonitorConfig;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::debug;

/// Probes a single URL once per call.
pub struct HealthChecker {
    url: String,
    client: Client,
    classifier: Arc<dyn ResponseClassifier>,
}

impl HealthChecker {
    /// Build a checker from the monitor configuration. The request timeout
    /// is only set when one was configured; otherwise the transport default
    /// applies.
    pub fn new(config: &MonitorConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.check_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url: config.api_url.clone(),
            client: builder.build()?,
            classifier: config.mode.classifier(),
        })
    }

    pub fn with_client(
        url: impl Into<String>,
        client: Client,
        classifier: Arc<dyn ResponseClassifier>,
    ) -> Self {
        Self {
            url: url.into(),
            client,
            classifier,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn check(&self) -> HealthOutcome {
        self.probe().await.into()
    }

    async fn probe(&self) -> Result<(), CheckFailure> {
        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await
            .map_err(|e| CheckFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        debug!("GET {} returned {}", self.url, status);

        // Drain the body on every path so the connection goes back to the pool.
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<failed to read body: {}>", e),
            };
            return Err(CheckFailure::BadStatus { status, body });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CheckFailure::Unreachable(e.to_string()))?;

        self.classifier.classify(&body)
    }
}
