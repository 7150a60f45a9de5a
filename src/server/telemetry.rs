use crate::config::Config;
use std::error::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub json_format: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            json_format: false,
            show_thread_ids: false,
            show_targets: true,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            json_format: config.log_json,
            ..Default::default()
        }
    }

    pub fn with_json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                self.default_level
            ))
        })
    }

    pub fn init(self) -> Result<(), Box<dyn Error>> {
        let json_layer = self.json_format.then(|| {
            fmt::layer()
                .json()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
        });
        let text_layer = (!self.json_format).then(|| {
            fmt::layer()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
        });

        let registry = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(json_layer)
            .with(text_layer);

        #[cfg(feature = "telemetry")]
        if let Some(tracer) = jaeger::tracer()? {
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
            tracing::info!("Telemetry initialized");
            return Ok(());
        }

        registry.try_init()?;
        Ok(())
    }
}

/// Flushes exported spans. A no-op unless the `telemetry` feature is on.
pub fn shutdown_telemetry() {
    #[cfg(feature = "telemetry")]
    if jaeger::enabled() {
        opentelemetry::global::shutdown_tracer_provider();
    }
}

#[cfg(feature = "telemetry")]
mod jaeger {
    use opentelemetry::sdk::propagation::TraceContextPropagator;
    use opentelemetry::sdk::{
        trace::{self, RandomIdGenerator, Sampler, Tracer},
        Resource,
    };
    use opentelemetry::{global, KeyValue};
    use std::env;
    use std::error::Error;

    const SERVICE_NAME: &str = "duo-relay";

    pub fn enabled() -> bool {
        env::var("ENABLE_TELEMETRY")
            .ok()
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(false)
    }

    /// Builds the Jaeger exporter when `ENABLE_TELEMETRY=true`.
    pub fn tracer() -> Result<Option<Tracer>, Box<dyn Error>> {
        if !enabled() {
            return Ok(None);
        }

        global::set_text_map_propagator(TraceContextPropagator::new());

        let endpoint = env::var("JAEGER_ENDPOINT")
            .unwrap_or_else(|_| "http://jaeger:14268/api/traces".to_string());

        let tracer = opentelemetry_jaeger::new_collector_pipeline()
            .with_service_name(SERVICE_NAME)
            .with_endpoint(&endpoint)
            .with_isahc()
            .with_trace_config(
                trace::config()
                    .with_sampler(Sampler::AlwaysOn)
                    .with_id_generator(RandomIdGenerator::default())
                    .with_resource(Resource::new(vec![
                        KeyValue::new("service.name", SERVICE_NAME),
                        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                    ])),
            )
            .with_timeout(std::time::Duration::from_secs(2))
            .install_batch(opentelemetry::runtime::Tokio)?;

        Ok(Some(tracer))
    }
}
