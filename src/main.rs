// src/main.rs
use anyhow::{Context, Result};
use tracing::info;

use uptime_monitor::{
    config::ConfigLoader,
    health::HealthChecker,
    notify::TelegramNotifier,
    scheduler::Scheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_monitor=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load configuration; any failure here ends the process before polling starts
    let config = ConfigLoader::new()
        .load()
        .context("Failed to load monitor configuration")?;

    info!(
        "Loaded configuration: target {}, mode {}, timeout {:?}",
        config.api_url,
        config.mode,
        config.check_timeout()
    );

    let checker = HealthChecker::new(&config).context("Failed to create HTTP client")?;
    let notifier = TelegramNotifier::from_config(&config);

    Scheduler::new(checker, notifier, config.interval())
        .run()
        .await;

    Ok(())
}
