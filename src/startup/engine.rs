use actix_web::dev::Server;
use actix_web::middleware::{self, TrailingSlash};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing_actix_web::TracingLogger;

use crate::routes::*;

use super::prepare::Kits;

/// Routes live on resources so a wrong method gets 405 rather than the scope's 404.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/cron").route(web::get().to(cron)))
            .service(web::resource("/health_check").route(web::get().to(health_check))),
    );
}

pub struct Engine {
    port: u16,
    web_server: Server,
}

impl Engine {
    pub fn build(kits: Kits) -> Result<Self> {
        let port = kits
            .listener
            .local_addr()
            .context("Failed to read the bound address")?
            .port();
        let clock = web::Data::from(kits.clock);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .wrap(middleware::NormalizePath::new(TrailingSlash::Trim))
                .configure(api_routes)
                .app_data(clock.clone())
        })
        .listen(kits.listener)
        .context("Failed to listen on the prepared socket")?
        .run();

        tracing::info!(port, "Server is ready");

        Ok(Self {
            port,
            web_server: server,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn spinup(self) -> Result<(), std::io::Error> {
        self.web_server.await
    }
}
