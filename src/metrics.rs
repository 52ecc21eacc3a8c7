//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the TP-Link exporter.
//!
//! # Metrics
//!
//! - `tplinkexporter_port_state` - Port state (1=enabled, 0=disabled)
//! - `tplinkexporter_port_link_status` - Link status code reported by the switch
//! - `tplinkexporter_port_{tx,rx}_{good,bad}_packets` - Packet counters, active ports only
//! - `tplinkexporter_up` - Whether the last scrape of the switch succeeded
//!
//! Per-port metrics are labeled with `host` (the switch) and `port` (1-based port number).

use crate::tplink::PacketCounter;
use prometheus::{Encoder, Gauge, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

const NAMESPACE: &str = "tplinkexporter";
const PORT_LABELS: &[&str] = &["host", "port"];

/// Metrics collector for the switch
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    // Port metrics
    pub port_state: Arc<IntGaugeVec>,
    pub port_link_status: Arc<IntGaugeVec>,

    // Packet counters
    pub port_tx_good_packets: Arc<GaugeVec>,
    pub port_tx_bad_packets: Arc<GaugeVec>,
    pub port_rx_good_packets: Arc<GaugeVec>,
    pub port_rx_bad_packets: Arc<GaugeVec>,

    pub up: Arc<Gauge>,
}

fn port_gauge(name: &str, help: &str) -> prometheus::Result<GaugeVec> {
    GaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), PORT_LABELS)
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let port_state = IntGaugeVec::new(
            Opts::new("port_state", "Port state (1=enabled, 0=disabled)").namespace(NAMESPACE),
            PORT_LABELS,
        )?;

        let port_link_status = IntGaugeVec::new(
            Opts::new(
                "port_link_status",
                "Link status code (0=down, 1=auto, 2=10M half, 3=10M full, 4=100M half, 5=100M full, 6=1000M full)",
            )
            .namespace(NAMESPACE),
            PORT_LABELS,
        )?;

        let port_tx_good_packets = port_gauge(
            "port_tx_good_packets",
            "Packets transmitted without error on the port",
        )?;
        let port_tx_bad_packets =
            port_gauge("port_tx_bad_packets", "Packets transmitted with errors on the port")?;
        let port_rx_good_packets = port_gauge(
            "port_rx_good_packets",
            "Packets received without error on the port",
        )?;
        let port_rx_bad_packets =
            port_gauge("port_rx_bad_packets", "Packets received with errors on the port")?;

        let up = Gauge::with_opts(
            Opts::new(
                "up",
                "Whether the last scrape of the switch succeeded (1=up, 0=down)",
            )
            .namespace(NAMESPACE),
        )?;

        // Register all metrics
        registry.register(Box::new(port_state.clone()))?;
        registry.register(Box::new(port_link_status.clone()))?;
        registry.register(Box::new(port_tx_good_packets.clone()))?;
        registry.register(Box::new(port_tx_bad_packets.clone()))?;
        registry.register(Box::new(port_rx_good_packets.clone()))?;
        registry.register(Box::new(port_rx_bad_packets.clone()))?;
        registry.register(Box::new(up.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            port_state: Arc::new(port_state),
            port_link_status: Arc::new(port_link_status),
            port_tx_good_packets: Arc::new(port_tx_good_packets),
            port_tx_bad_packets: Arc::new(port_tx_bad_packets),
            port_rx_good_packets: Arc::new(port_rx_good_packets),
            port_rx_bad_packets: Arc::new(port_rx_bad_packets),
            up: Arc::new(up),
        })
    }

    /// Gauge holding the given packet counter
    pub fn packet_gauge(&self, counter: PacketCounter) -> &GaugeVec {
        match counter {
            PacketCounter::TxGood => self.port_tx_good_packets.as_ref(),
            PacketCounter::TxBad => self.port_tx_bad_packets.as_ref(),
            PacketCounter::RxGood => self.port_rx_good_packets.as_ref(),
            PacketCounter::RxBad => self.port_rx_bad_packets.as_ref(),
        }
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Drop all per-port series before a fresh scrape
    pub fn reset_ports(&self) {
        self.port_state.reset();
        self.port_link_status.reset();
        for counter in PacketCounter::ALL {
            self.packet_gauge(counter).reset();
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}
