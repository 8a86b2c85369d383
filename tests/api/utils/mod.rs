use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use std::sync::Arc;

use cron_ack::clock::{Clock, FixedClock};
use cron_ack::startup::engine::Engine as WebEngine;
use cron_ack::startup::prepare::{prepare_clock, Kits};
use cron_ack::telemetry::{get_subscriber, init_subscriber, LoggerFormat, LoggerOutbound};

static TRACING: Lazy<()> = Lazy::new(|| {
    let use_test_log = std::env::var("TEST_LOG").map_or(false, |x| {
        matches!(x.as_str(), "1" | "true" | "yes" | "TRUE")
    });

    let valid_levels = ["info", "error", "trace", "warn", "debug"];
    let level = std::env::var("LOG_LEVEL").ok();
    let log_level = level
        .as_deref()
        .filter(|lvl| valid_levels.contains(lvl))
        .unwrap_or("error");

    let format = LoggerFormat::Pretty;

    let subscriber = if use_test_log {
        get_subscriber(
            log_level.into(),
            format,
            LoggerOutbound::new(std::io::stderr),
        )
    } else {
        get_subscriber("debug".into(), format, LoggerOutbound::new(std::io::sink))
    };
    init_subscriber(subscriber).expect("Failed to init test subscriber");
});

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_server() -> TestApp {
        Self::spawn_with_clock(prepare_clock()).await
    }

    pub async fn spawn_frozen_at(instant: DateTime<Utc>) -> TestApp {
        Self::spawn_with_clock(Arc::new(FixedClock(instant))).await
    }

    async fn spawn_with_clock(clock: Arc<dyn Clock>) -> TestApp {
        Lazy::force(&TRACING);
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to create listener");

        let engine = WebEngine::build(Kits::new(listener, clock)).expect("Failed to build server");
        let address = format!("http://127.0.0.1:{}/api", engine.port());
        tokio::spawn(engine.spinup());

        TestApp {
            address,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to send request")
    }
}
