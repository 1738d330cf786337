//! # Flapi - schema-driven mock data
//!
//! Flapi turns a small JSON schema into randomly generated JSON documents.
//! Each field of the schema is either a nested schema or a descriptor
//! string in a compact mini-language:
//!
//! ```text
//! {
//!   "id":      "int(len=6)",
//!   "email":   "email(domain=example.com)",
//!   "tags":    "list-str(amount=2$len=5)",
//!   "address": { "street": "address", "phone": "phone(code=44)" },
//!   "orders":  { "_$amount": 3, "total": "float", "paid": "bool" }
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Generator**: descriptor parsing, scalar and list generators and the
//!   recursive schema expander. Synchronous and stateless.
//! - **Adapters**: the `/gen` HTTP endpoint, health checks, metrics and
//!   rate limiting.
//! - **Config**: settings layered from file, environment and CLI.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;

use crate::adapters::generate_handler::{self, GenerateState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::metrics_handler::{MetricsCollector, MetricsHandler};
use crate::config::Settings;
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(settings: Arc<Settings>, metrics: Arc<MetricsCollector>) -> Router {
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));
    let metrics_handler = Arc::new(MetricsHandler::new(metrics.clone()));

    // Public routes (never rate limited)
    let public_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }))
        .route("/metrics", get({
            let handler = metrics_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.metrics().await }
            }
        }));

    let state = GenerateState::new(settings.generation.clone(), metrics);
    let mut generate_router = Router::new()
        .route("/gen", any(generate_handler::generate))
        .with_state(state);

    if let Some(rate_limit) = &settings.rate_limit {
        if rate_limit.enabled {
            let limiter = crate::adapters::rate_limit::create_limiter(
                rate_limit.requests_per_second,
                rate_limit.burst_size,
            );

            generate_router = generate_router.layer(axum::middleware::from_fn_with_state(
                limiter,
                crate::adapters::rate_limit::rate_limit_middleware,
            ));
        }
    }

    public_router
        .merge(generate_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
