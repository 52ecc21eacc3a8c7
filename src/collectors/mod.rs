//! Metrics Collectors
//!
//! Collectors query the switch through the session client and update the
//! corresponding Prometheus metrics.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` containing shared state
//! - Query the switch
//! - Update Prometheus metrics using helper methods
//! - Return the number of series groups written, or the query error
//!
//! # Error Handling
//!
//! Collector failures are fatal for the scrape. A failed query leaves the metrics
//! untouched and the error propagates so the scrape can be reported as failed
//! instead of serving stale or partial data.

use crate::metrics::MetricsCollector;
use crate::tplink::{HttpTransport, SessionClient, SwitchTransport};
use tracing::{info, warn};

/// Shared context passed to all collectors
///
/// All fields are immutable references, so no invariants can be violated.
pub struct CollectionContext<'a, T: SwitchTransport = HttpTransport> {
    /// Session client for the switch
    pub client: &'a SessionClient<T>,
    /// Metrics collector for updating Prometheus metrics
    pub metrics: &'a MetricsCollector,
}

impl<T: SwitchTransport> Clone for CollectionContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SwitchTransport> Copy for CollectionContext<'_, T> {}

/// Result type for collector functions
pub type CollectionResult = anyhow::Result<usize>;

/// Helper to reduce boilerplate in collectors
///
/// - On success: processes data, logs success, returns what `process` returned
/// - On error: logs warning, returns the error
///
/// # Arguments
///
/// * `name` - Name of the metric type being collected (for logging)
/// * `query_future` - Async switch query that returns data
/// * `process` - Function to process the data and update metrics
pub async fn collect_with_handler<T, F, P, E>(
    name: &str,
    query_future: F,
    process: P,
) -> CollectionResult
where
    F: std::future::Future<Output = Result<T, E>>,
    E: Into<anyhow::Error> + std::fmt::Display,
    P: FnOnce(T) -> usize,
{
    match query_future.await {
        Ok(data) => {
            let updated = process(data);
            info!("Updated {} metrics for {} entries", name, updated);
            Ok(updated)
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            Err(e.into())
        }
    }
}

pub mod port;

pub use port::{collect_port_metrics, record_port_metrics};
