//! Prometheus metrics and tracing spans for search and provisioning.
//!
//! Metrics are recorded through OpenTelemetry and exported via a Prometheus registry;
//! call [`SearchMetrics::encode`] from your `/metrics` handler.

#[cfg(feature = "metrics")]
pub use prometheus_metrics::*;

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        metrics::{Counter, Histogram, MeterProvider},
        KeyValue,
    };
    use opentelemetry_prometheus::PrometheusExporter;
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Encoder, Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<SearchMetrics> = Lazy::new(SearchMetrics::init);

    pub struct SearchMetrics {
        pub registry: Registry,
        pub provider: SdkMeterProvider,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub searches_total: Counter<u64>,
        pub search_duration: Histogram<f64>,
        pub provisioning_stages_total: Counter<u64>,
    }

    impl SearchMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let provider = match build_exporter(&registry) {
                Some(exporter) => SdkMeterProvider::builder().with_reader(exporter).build(),
                None => SdkMeterProvider::builder().build(),
            };
            let meter = provider.meter("lifeguard_search");

            let queries_total = meter
                .u64_counter("lifeguard_search_queries_total")
                .with_description("Total statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("lifeguard_search_query_errors_total")
                .with_description("Statements that failed in the database")
                .build();

            let query_duration = meter
                .f64_histogram("lifeguard_search_query_duration_seconds")
                .with_description("Duration of statements")
                .build();

            let searches_total = meter
                .u64_counter("lifeguard_search_searches_total")
                .with_description("Full-text searches executed, by outcome")
                .build();

            let search_duration = meter
                .f64_histogram("lifeguard_search_search_duration_seconds")
                .with_description("Duration of full-text searches including row mapping")
                .build();

            let provisioning_stages_total = meter
                .u64_counter("lifeguard_search_provisioning_stages_total")
                .with_description("Provisioning stages run, by stage and outcome")
                .build();

            Self {
                registry,
                provider,
                queries_total,
                query_errors_total,
                query_duration,
                searches_total,
                search_duration,
                provisioning_stages_total,
            }
        }

        pub fn record_query_duration(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_search(&self, elapsed: Duration, ok: bool) {
            let outcome = KeyValue::new("outcome", if ok { "ok" } else { "error" });
            self.searches_total.add(1, &[outcome]);
            self.search_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_provisioning_stage(&self, stage: &'static str, ok: bool) {
            self.provisioning_stages_total.add(
                1,
                &[
                    KeyValue::new("stage", stage),
                    KeyValue::new("outcome", if ok { "ok" } else { "error" }),
                ],
            );
        }

        /// Render the registry in the Prometheus text exposition format
        pub fn encode(&self) -> String {
            let mut buffer = Vec::new();
            let encoder = TextEncoder::new();
            if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
                log::warn!("failed to encode metrics: {}", e);
            }
            String::from_utf8(buffer).unwrap_or_default()
        }
    }

    fn build_exporter(registry: &Registry) -> Option<PrometheusExporter> {
        match opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()
        {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                log::warn!("failed to build prometheus exporter, metrics disabled: {}", e);
                None
            }
        }
    }
}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::{info_span, Span};

    pub fn connect_span() -> Span {
        info_span!("lifeguard_search.connect")
    }

    /// Span for a single statement; carries the SQL text, never parameter values
    pub fn execute_query_span(query: &str) -> Span {
        info_span!("lifeguard_search.execute", db.system = "postgresql", db.statement = %query)
    }

    pub fn search_span(table: &str, columns: usize) -> Span {
        info_span!("lifeguard_search.search", db.table = %table, columns)
    }

    pub fn provision_stage_span(table: &str, stage: &str) -> Span {
        info_span!("lifeguard_search.provision", db.table = %table, stage = %stage)
    }
}
