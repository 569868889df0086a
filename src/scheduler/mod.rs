// src/scheduler/mod.rs
mod clock;

pub use clock::{Clock, TokioClock};

use crate::health::{CheckFailure, HealthChecker, HealthOutcome};
use crate::notify::{truncate_chars, Notifier, NotifyError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{error, info, warn};

/// What happened during one check/notify iteration.
#[derive(Debug)]
pub struct IterationReport {
    pub checked_at: DateTime<Utc>,
    pub outcome: HealthOutcome,
    /// `None` when the check passed and nothing was sent.
    pub notification: Option<Result<(), NotifyError>>,
}

/// Drives the check → notify → sleep loop.
pub struct Scheduler<N, C = TokioClock> {
    checker: HealthChecker,
    notifier: N,
    clock: C,
    interval: Duration,
}

impl<N: Notifier> Scheduler<N, TokioClock> {
    pub fn new(checker: HealthChecker, notifier: N, interval: Duration) -> Self {
        Self::with_clock(checker, notifier, interval, TokioClock)
    }
}

impl<N: Notifier, C: Clock> Scheduler<N, C> {
    pub fn with_clock(checker: HealthChecker, notifier: N, interval: Duration, clock: C) -> Self {
        Self {
            checker,
            notifier,
            clock,
            interval,
        }
    }

    /// Loop until the process is killed.
    pub async fn run(&self) {
        info!(
            "Monitoring {} every {:?}",
            self.checker.url(),
            self.interval
        );

        loop {
            self.tick().await;
            self.clock.sleep(self.interval).await;
        }
    }

    /// Run a fixed number of iterations, sleeping after each one.
    pub async fn run_iterations(&self, iterations: usize) -> Vec<IterationReport> {
        let mut reports = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            reports.push(self.tick().await);
            self.clock.sleep(self.interval).await;
        }
        reports
    }

    /// One check, plus a notification if it failed. Never fails itself.
    pub async fn tick(&self) -> IterationReport {
        let checked_at = Utc::now();
        let outcome = self.checker.check().await;

        let notification = match &outcome {
            HealthOutcome::Healthy => {
                info!("{} is healthy", self.checker.url());
                None
            }
            HealthOutcome::Failed(failure) => {
                warn!(
                    kind = %failure.kind(),
                    "{} failed health check: {}",
                    self.checker.url(),
                    failure
                );

                let message = self.compose_message(failure, checked_at);
                let result = self.notifier.notify(&message).await;
                match &result {
                    Ok(()) => info!("Failure notification delivered"),
                    Err(e) => error!("Failure notification not delivered: {}", e),
                }
                Some(result)
            }
        };

        IterationReport {
            checked_at,
            outcome,
            notification,
        }
    }

    /// Build the alert text. The failure detail (which may carry a whole
    /// error page) is cut first so the header and timestamp survive the
    /// notifier's length limit.
    fn compose_message(&self, failure: &CheckFailure, checked_at: DateTime<Utc>) -> String {
        let header = format!(
            "Health check failed for {} ({})\n",
            self.checker.url(),
            failure.kind()
        );
        let footer = format!("\nChecked at {}", checked_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let detail = failure.to_string();

        match self.notifier.max_message_chars() {
            Some(limit) => {
                let budget =
                    limit.saturating_sub(header.chars().count() + footer.chars().count());
                let message = format!("{}{}{}", header, truncate_chars(&detail, budget), footer);
                truncate_chars(&message, limit)
            }
            None => format!("{}{}{}", header, detail, footer),
        }
    }
}
