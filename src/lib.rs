//! TP-Link Easy Smart Switch Prometheus Exporter
//!
//! A Prometheus metrics exporter for TP-Link Easy Smart switches (TL-SG108E and
//! relatives) that only offer a web management interface.
//!
//! # Overview
//!
//! The exporter logs in to the switch web UI, scrapes the port statistics page,
//! turns the script literal embedded in it into typed per-port records, and exposes
//! them in Prometheus format. The switch is queried on every scrape of `/metrics`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     HTTP + cookie     ┌──────────────┐
//! │   TP-Link   │ ◄──────────────────►  │   Exporter   │
//! │   switch    │  logon.cgi / .htm     │              │
//! └─────────────┘                       │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                       │  │Session │  │ ◄────────────► │ Prometheus │
//!                                       │  │ Client │  │   /metrics     └────────────┘
//!                                       │  └────────┘  │
//!                                       │  ┌────────┐  │
//!                                       │  │Metrics │  │
//!                                       │  └────────┘  │
//!                                       └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tplink`] - Session client, page parser and port record types
//! - [`collectors`] - Maps port records onto Prometheus metrics
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use tplink_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod tplink;
