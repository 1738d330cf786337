pub mod generate_handler;
pub mod health_handler;
pub mod metrics_handler;
pub mod rate_limit;
