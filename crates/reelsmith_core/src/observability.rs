//! Logging and OpenTelemetry metrics initialization.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use opentelemetry_stdout::MetricExporter as StdoutExporter;
#[cfg(feature = "metrics")]
use std::sync::Mutex;
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{debug, info, instrument};
#[cfg(feature = "metrics")]
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Provider installed by [`init_observability`], kept for flushing on shutdown.
#[cfg(feature = "metrics")]
static METER_PROVIDER: Mutex<Option<SdkMeterProvider>> = Mutex::new(None);

/// Log line format for the tracing subscriber.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output
    #[default]
    Compact,
    /// Newline-delimited JSON for log shippers
    Json,
}

/// Install the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Returns an
/// error if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    debug!(format = %format, "Tracing subscriber installed");
    Ok(())
}

/// Initialize OpenTelemetry metrics with OTLP or stdout export.
///
/// Checks the `OTEL_EXPORTER` environment variable:
/// - "otlp" -> OTLP exporter to `OTEL_EXPORTER_OTLP_ENDPOINT` (default: http://localhost:4318)
/// - "stdout" or unset -> stdout exporter
///
/// When the `metrics` feature is disabled, this function returns `Ok(())` immediately.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), String> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        info!(
            service_name = service_name,
            "Metrics feature disabled - skipping metrics initialization"
        );
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        info!(
            service_name = service_name,
            export_interval_secs = export_interval_secs,
            "Initializing OpenTelemetry metrics"
        );

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();

        let exporter_type = std::env::var("OTEL_EXPORTER").unwrap_or_else(|_| "stdout".to_string());
        info!(exporter_type = %exporter_type, "Selecting metrics exporter");

        let meter_provider = match exporter_type.as_str() {
            "otlp" => {
                let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:4318".to_string());
                info!(endpoint = %endpoint, "Using OTLP metrics exporter");

                let exporter = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| {
                        let msg = format!("Failed to create OTLP exporter: {}", e);
                        warn!(%msg, "OTLP exporter creation failed");
                        msg
                    })?;

                let reader = PeriodicReader::builder(exporter)
                    .with_interval(Duration::from_secs(export_interval_secs))
                    .build();

                SdkMeterProvider::builder()
                    .with_resource(resource)
                    .with_reader(reader)
                    .build()
            }
            _ => {
                info!("Using stdout metrics exporter");
                let reader = PeriodicReader::builder(StdoutExporter::default())
                    .with_interval(Duration::from_secs(export_interval_secs))
                    .build();

                SdkMeterProvider::builder()
                    .with_resource(resource)
                    .with_reader(reader)
                    .build()
            }
        };

        global::set_meter_provider(meter_provider.clone());
        let mut slot = METER_PROVIDER
            .lock()
            .map_err(|e| format!("Meter provider lock poisoned: {}", e))?;
        if let Some(previous) = slot.replace(meter_provider) {
            if let Err(e) = previous.shutdown() {
                warn!(error = %e, "Failed to shut down previous meter provider");
            }
        }
        info!(service_name = service_name, "Meter provider registered globally");
        Ok(())
    }
}

/// Flush pending metrics and shut the meter provider down.
///
/// Does nothing when no provider was installed or the `metrics` feature is
/// disabled.
#[instrument]
pub fn shutdown_observability() -> Result<(), String> {
    #[cfg(feature = "metrics")]
    {
        let provider = METER_PROVIDER
            .lock()
            .map_err(|e| format!("Meter provider lock poisoned: {}", e))?
            .take();
        if let Some(provider) = provider {
            info!("Shutting down OpenTelemetry metrics provider");
            provider
                .shutdown()
                .map_err(|e| format!("Failed to shut down meter provider: {}", e))?;
        }
    }

    debug!("Metrics shutdown complete");
    Ok(())
}
