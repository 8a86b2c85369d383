mod cron;
mod health_check;
mod utils;
