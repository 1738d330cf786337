//! `/gen` endpoint: validates the request and hands the schema to the generator.
//!
//! ```text
//! GET  /gen?amount=5&schema={"id":"int(len=4)"}
//! POST /gen?amount=5&seed=42      body: {"id":"int(len=4)"}
//! ```

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::adapters::metrics_handler::MetricsCollector;
use crate::config::GenerationSettings;
use crate::error::ApiError;
use crate::generator::{Document, MockGenerator, Schema};

#[derive(Clone)]
pub struct GenerateState {
    pub generator: Arc<MockGenerator>,
    pub settings: GenerationSettings,
    pub metrics: Arc<MetricsCollector>,
}

impl GenerateState {
    pub fn new(settings: GenerationSettings, metrics: Arc<MetricsCollector>) -> Self {
        let generator = MockGenerator::new(settings.limits(), settings.seed);
        Self {
            generator: Arc::new(generator),
            settings,
            metrics,
        }
    }
}

/// Raw query parameters; parsed by hand so bad values map to our own errors.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub amount: Option<String>,
    pub schema: Option<String>,
    pub seed: Option<String>,
}

/// A validated generation request.
#[derive(Debug)]
pub struct GenerationRequest {
    pub schema: Schema,
    pub amount: usize,
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// Validate query and body. The schema comes from the `schema` query
    /// parameter, or from the body when the parameter is absent or empty.
    pub fn from_parts(
        query: GenerateQuery,
        body: &[u8],
        settings: &GenerationSettings,
    ) -> Result<Self, ApiError> {
        let amount = parse_amount(query.amount.as_deref(), settings)?;

        let seed = match query.seed.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| ApiError::InvalidSeed)?),
        };

        let raw_schema: &[u8] = match query.schema.as_deref() {
            Some(schema) if !schema.is_empty() => schema.as_bytes(),
            _ => body,
        };
        if raw_schema.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::MissingSchema);
        }

        let schema: Schema = serde_json::from_slice(raw_schema)
            .map_err(|e| ApiError::InvalidSchema(Some(e)))?;

        Ok(Self {
            schema,
            amount,
            seed,
        })
    }
}

fn parse_amount(raw: Option<&str>, settings: &GenerationSettings) -> Result<usize, ApiError> {
    let out_of_range = || ApiError::AmountOutOfRange {
        max: settings.max_amount,
    };

    match raw.map(str::trim) {
        None | Some("") => Ok(settings.default_amount),
        Some(raw) => {
            let amount = raw.parse::<i64>().map_err(|_| out_of_range())?;
            usize::try_from(amount)
                .ok()
                .filter(|n| (1..=settings.max_amount).contains(n))
                .ok_or_else(out_of_range)
        }
    }
}

pub async fn generate(
    State(state): State<GenerateState>,
    Query(query): Query<GenerateQuery>,
    body: Bytes,
) -> Result<Json<Vec<Document>>, ApiError> {
    let result = handle(&state, query, &body).await;

    let status = match &result {
        Ok(_) => "200".to_string(),
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Rejected generation request");
            e.status_code().as_u16().to_string()
        }
    };
    state.metrics.requests_total.with_label_values(&[status.as_str()]).inc();

    result.map(Json)
}

async fn handle(
    state: &GenerateState,
    query: GenerateQuery,
    body: &[u8],
) -> Result<Vec<Document>, ApiError> {
    let request = GenerationRequest::from_parts(query, body, &state.settings)?;
    debug!(schema = %serde_json::Value::Object(request.schema.clone()), "Parsed schema");

    let generator = state.generator.clone();
    let timer = state.metrics.generation_duration.start_timer();
    let GenerationRequest {
        schema,
        amount,
        seed,
    } = request;

    let generation = tokio::task::spawn_blocking(move || generator.generate(&schema, amount, seed))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    timer.observe_duration();

    state
        .metrics
        .documents_generated
        .inc_by(generation.documents.len() as f64);
    state
        .metrics
        .invalid_fields
        .inc_by(generation.invalid_fields as f64);

    info!(
        amount,
        seeded = seed.is_some(),
        invalid_fields = generation.invalid_fields,
        "Generated mock documents"
    );

    Ok(generation.documents)
}
