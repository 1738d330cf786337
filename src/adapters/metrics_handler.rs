use prometheus::{
    Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

pub struct MetricsCollector {
    registry: Registry,

    // Request metrics
    pub requests_total: CounterVec,

    // Generation metrics
    pub documents_generated: Counter,
    pub invalid_fields: Counter,
    pub generation_duration: Histogram,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new("flapi_requests_total", "Total number of generation requests"),
            &["status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let documents_generated = Counter::new(
            "flapi_documents_generated_total",
            "Total number of generated top-level documents",
        )?;
        registry.register(Box::new(documents_generated.clone()))?;

        let invalid_fields = Counter::new(
            "flapi_invalid_fields_total",
            "Fields that produced the invalid-type placeholder",
        )?;
        registry.register(Box::new(invalid_fields.clone()))?;

        let generation_duration = Histogram::with_opts(HistogramOpts::new(
            "flapi_generation_duration_seconds",
            "Time spent expanding schemas",
        ))?;
        registry.register(Box::new(generation_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            documents_generated,
            invalid_fields,
            generation_duration,
        })
    }

    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub struct MetricsHandler {
    collector: Arc<MetricsCollector>,
}

impl MetricsHandler {
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }

    pub async fn metrics(&self) -> String {
        self.collector.encode().unwrap_or_else(|e| {
            tracing::error!("Failed to encode metrics: {}", e);
            String::from("# Error encoding metrics\n")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::new();
        assert!(collector.is_ok());
    }

    #[test]
    fn test_metrics_encoding() {
        let collector = MetricsCollector::new().unwrap();

        collector.requests_total.with_label_values(&["200"]).inc();
        collector.documents_generated.inc_by(3.0);

        let metrics_text = collector.encode().unwrap();
        assert!(metrics_text.contains("flapi_requests_total"));
        assert!(metrics_text.contains("flapi_documents_generated_total 3"));
    }

    #[tokio::test]
    async fn test_metrics_handler() {
        let collector = Arc::new(MetricsCollector::new().unwrap());
        let handler = MetricsHandler::new(collector.clone());

        collector.invalid_fields.inc();

        let metrics = handler.metrics().await;
        assert!(metrics.contains("flapi_invalid_fields_total 1"));
    }
}
