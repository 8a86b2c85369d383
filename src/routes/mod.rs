pub mod cron;
pub mod health_check;

pub use cron::*;
pub use health_check::*;
