//! HTTP Server and Metrics Collection
//!
//! This module implements the Prometheus exporter HTTP server.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Scrape on demand**: every `/metrics` request queries the switch; there is no
//!   background polling loop
//! - **State Management**: Shared state (metrics, client) using Arc for thread-safety
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format, 503 if the switch could not be scraped
//! - `GET /health` - Health check (returns 200 if the last scrape succeeded, 503 otherwise)
//!
//! # Error Handling
//!
//! A failed scrape is reported as a failed request. Port series are cleared first so
//! no stale values from an earlier scrape are ever served.

use crate::collectors::{self, CollectionContext};
use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::tplink::{SessionClient, SwitchTransport};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct AppState<T: SwitchTransport> {
    metrics: MetricsCollector,
    client: Arc<SessionClient<T>>,
    /// Serializes reset/collect/render on the shared registry
    scrape_lock: Arc<Mutex<()>>,
}

impl<T: SwitchTransport> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            metrics: self.metrics.clone(),
            client: self.client.clone(),
            scrape_lock: self.scrape_lock.clone(),
        }
    }
}

impl<T: SwitchTransport> AppState<T> {
    pub fn new(client: Arc<SessionClient<T>>, metrics: MetricsCollector) -> Self {
        Self {
            metrics,
            client,
            scrape_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let metrics = MetricsCollector::new()?;
    let client = Arc::new(SessionClient::from_config(&config.switch)?);

    // A failed first login is not fatal; every scrape logs in again as needed
    if let Err(e) = client.login().await {
        warn!("Initial login to {} failed: {}", client.host(), e);
    }

    let app = router(AppState::new(client, metrics));

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the exporter router
pub fn router<T: SwitchTransport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler::<T>))
        .route("/health", get(health_handler::<T>))
        .with_state(state)
}

/// Run one collection and render the result
///
/// On failure the port series stay cleared and `up` is set to 0.
pub async fn scrape<T: SwitchTransport>(
    client: &SessionClient<T>,
    metrics: &MetricsCollector,
) -> anyhow::Result<String> {
    info!("Collecting metrics from {}", client.host());
    metrics.reset_ports();

    let ctx = CollectionContext { client, metrics };
    if let Err(e) = collectors::collect_port_metrics(&ctx).await {
        metrics.up.set(0.0);
        return Err(e);
    }

    metrics.up.set(1.0);
    metrics.render()
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>TP-Link Switch Exporter</title></head>
<body>
<h1>TP-Link Switch Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler<T: SwitchTransport>(State(state): State<AppState<T>>) -> Response {
    let _guard = state.scrape_lock.lock().await;

    match scrape(state.client.as_ref(), &state.metrics).await {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to collect metrics: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Failed to collect metrics from {}: {}", state.client.host(), e),
            )
                .into_response()
        }
    }
}

async fn health_handler<T: SwitchTransport>(State(state): State<AppState<T>>) -> impl IntoResponse {
    let up_value = state.metrics.up.get();

    if up_value > 0.0 {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Switch unreachable")
    }
}
