use anyhow::Context;

use cron_ack::configuration::get_configurations;
use cron_ack::startup::engine::Engine;
use cron_ack::startup::prepare::Kits;
use cron_ack::telemetry::{get_subscriber, init_subscriber, LoggerOutbound};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load Configurations
    let config = get_configurations().context("Failed to read configuration")?;

    // Init Logger
    let log_subscriber = get_subscriber(
        config.application.log_level.clone(),
        config.application.logger_format,
        LoggerOutbound::stdout(),
    );
    init_subscriber(log_subscriber)?;

    let kits = Kits::prepare(&config).context("Failed to bind the listener")?;
    Engine::build(kits)?.spinup().await?;

    Ok(())
}
