//! Port Traffic Metrics Collector
//!
//! Collects per-port state, link status and packet counters.
//!
//! # Metrics Produced
//! - `tplinkexporter_port_state` - Labels: host, port
//! - `tplinkexporter_port_link_status` - Labels: host, port
//! - `tplinkexporter_port_{tx,rx}_{good,bad}_packets` - Labels: host, port
//!   (only for ports the switch reports as enabled)

use super::{collect_with_handler, CollectionContext, CollectionResult};
use crate::metrics::MetricsCollector;
use crate::tplink::{PortRecord, SwitchTransport};

/// Collects port metrics from the switch
///
/// # Returns
///
/// * `Ok(n)` - Metrics written for `n` ports
/// * `Err(_)` - The switch could not be queried or its page could not be parsed;
///   no port metrics were written
pub async fn collect_port_metrics<T: SwitchTransport>(
    ctx: &CollectionContext<'_, T>,
) -> CollectionResult {
    let host = ctx.client.host();
    collect_with_handler("port", ctx.client.get_port_stats(), |ports| {
        record_port_metrics(ctx.metrics, host, &ports)
    })
    .await
}

/// Write one snapshot of port records, port numbers starting at 1
pub fn record_port_metrics(metrics: &MetricsCollector, host: &str, ports: &[PortRecord]) -> usize {
    for (index, record) in ports.iter().enumerate() {
        let port = (index + 1).to_string();
        let labels = [host, port.as_str()];

        metrics.port_state.with_label_values(&labels).set(record.state);
        metrics
            .port_link_status
            .with_label_values(&labels)
            .set(record.link_status);

        if let Some(counters) = &record.counters {
            for (counter, value) in counters.iter() {
                metrics
                    .packet_gauge(counter)
                    .with_label_values(&labels)
                    .set(value as f64);
            }
        }
    }
    ports.len()
}
