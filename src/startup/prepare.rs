use std::net::TcpListener;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::configuration::Settings;

pub struct Kits {
    pub listener: TcpListener,
    pub clock: Arc<dyn Clock>,
}

impl Kits {
    pub fn new(listener: TcpListener, clock: Arc<dyn Clock>) -> Self {
        Self { listener, clock }
    }

    pub fn prepare(config: &Settings) -> Result<Self, std::io::Error> {
        Ok(Self {
            listener: prepare_listener(config)?,
            clock: prepare_clock(),
        })
    }
}

pub fn prepare_listener(config: &Settings) -> Result<TcpListener, std::io::Error> {
    TcpListener::bind(config.application.address())
}

pub fn prepare_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
