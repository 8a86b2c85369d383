use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::timestamp::ExecutionTimestamp;

#[derive(Debug, Serialize, Deserialize)]
pub struct CronAck {
    pub message: String,
}

impl From<ExecutionTimestamp> for CronAck {
    fn from(executed_at: ExecutionTimestamp) -> Self {
        Self {
            message: format!("Cron job executed at {executed_at}"),
        }
    }
}

/// Acknowledge an externally scheduled trigger.
/// The schedule itself lives with whatever calls this route.
/// Emits exactly one event and opens no span of its own.
pub async fn cron(clock: web::Data<dyn Clock>) -> HttpResponse {
    let executed_at = ExecutionTimestamp::now(clock.get_ref());
    tracing::info!("[CRON JOB] Executed at {executed_at}");

    HttpResponse::Ok().json(CronAck::from(executed_at))
}
