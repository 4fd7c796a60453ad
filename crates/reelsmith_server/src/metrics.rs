//! Per-operation request metrics.
//!
//! Counters are always kept in-process for the `/api/metrics/` snapshot.
//! With the `metrics` feature the same events are also recorded on
//! OpenTelemetry instruments.

use derive_getters::Getters;
#[cfg(feature = "metrics")]
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use reelsmith_core::Operation;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use strum::IntoEnumIterator;

/// How a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RequestOutcome {
    /// Envelope returned with a payload
    Succeeded {
        /// Output could not be parsed as JSON
        parse_warning: bool,
    },
    /// Rejected before dispatch
    Rejected,
    /// Inference or handler failure
    Failed,
}

#[derive(Debug, Default)]
struct OperationCounters {
    requests: AtomicU64,
    succeeded: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
    parse_warnings: AtomicU64,
    latency_ms_total: AtomicU64,
}

/// OpenTelemetry instruments for request handling.
///
/// Available with the `metrics` feature.
#[cfg(feature = "metrics")]
#[derive(Clone)]
struct RequestInstruments {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    requests: Counter<u64>,
    parse_warnings: Counter<u64>,
    duration: Histogram<f64>,
}

#[cfg(feature = "metrics")]
impl RequestInstruments {
    fn new() -> Self {
        let meter = global::meter("reelsmith_server");
        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("reelsmith.requests")
                .with_description("Operation requests by outcome")
                .build(),
            parse_warnings: meter
                .u64_counter("reelsmith.parse_warnings")
                .with_description("Model outputs returned as raw text")
                .build(),
            duration: meter
                .f64_histogram("reelsmith.request.duration")
                .with_unit("seconds")
                .with_description("Operation request duration")
                .build(),
        }
    }

    fn record(&self, operation: Operation, outcome: RequestOutcome, elapsed: Duration) {
        let labels = &[
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("outcome", outcome.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(elapsed.as_secs_f64(), labels);
        if let RequestOutcome::Succeeded {
            parse_warning: true,
        } = outcome
        {
            self.parse_warnings
                .add(1, &[KeyValue::new("operation", operation.to_string())]);
        }
    }
}

/// Request metrics shared by all handlers.
pub struct RequestMetrics {
    counters: HashMap<Operation, OperationCounters>,
    #[cfg(feature = "metrics")]
    instruments: RequestInstruments,
}

impl RequestMetrics {
    /// Create zeroed metrics for every operation.
    pub fn new() -> Self {
        Self {
            counters: Operation::iter()
                .map(|operation| (operation, OperationCounters::default()))
                .collect(),
            #[cfg(feature = "metrics")]
            instruments: RequestInstruments::new(),
        }
    }

    /// Record one finished request.
    pub fn record(&self, operation: Operation, outcome: RequestOutcome, elapsed: Duration) {
        if let Some(counters) = self.counters.get(&operation) {
            counters.requests.fetch_add(1, Ordering::Relaxed);
            counters
                .latency_ms_total
                .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
            match outcome {
                RequestOutcome::Succeeded { parse_warning } => {
                    counters.succeeded.fetch_add(1, Ordering::Relaxed);
                    if parse_warning {
                        counters.parse_warnings.fetch_add(1, Ordering::Relaxed);
                    }
                }
                RequestOutcome::Rejected => {
                    counters.rejected.fetch_add(1, Ordering::Relaxed);
                }
                RequestOutcome::Failed => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        #[cfg(feature = "metrics")]
        self.instruments.record(operation, outcome, elapsed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let operations = self
            .counters
            .iter()
            .map(|(operation, counters)| {
                let requests = counters.requests.load(Ordering::Relaxed);
                let latency_total = counters.latency_ms_total.load(Ordering::Relaxed);
                let avg_latency_ms = if requests == 0 {
                    0.0
                } else {
                    latency_total as f64 / requests as f64
                };
                let snapshot = OperationSnapshot {
                    requests,
                    succeeded: counters.succeeded.load(Ordering::Relaxed),
                    rejected: counters.rejected.load(Ordering::Relaxed),
                    failed: counters.failed.load(Ordering::Relaxed),
                    parse_warnings: counters.parse_warnings.load(Ordering::Relaxed),
                    avg_latency_ms,
                };
                (operation.to_string(), snapshot)
            })
            .collect();
        MetricsSnapshot { operations }
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics snapshot for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Getters)]
pub struct MetricsSnapshot {
    /// Per-operation counters keyed by operation name
    operations: BTreeMap<String, OperationSnapshot>,
}

/// Counters for a single operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Getters)]
pub struct OperationSnapshot {
    /// Total requests
    requests: u64,
    /// Requests answered with a payload
    succeeded: u64,
    /// Requests rejected by validation
    rejected: u64,
    /// Requests that failed after dispatch
    failed: u64,
    /// Successful requests whose output was not valid JSON
    parse_warnings: u64,
    /// Average handling time in milliseconds
    avg_latency_ms: f64,
}
