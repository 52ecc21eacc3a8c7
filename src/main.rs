use anyhow::Result;
use clap::Parser;
use tplink_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Host of the target TP-Link Easy Smart switch (overrides config)
    #[arg(long, env = "TPLINK_HOST")]
    host: Option<String>,

    /// Username for the switch web UI (overrides config)
    #[arg(short, long, env = "TPLINK_USERNAME")]
    username: Option<String>,

    /// Password for the switch web UI (overrides config)
    #[arg(long, env = "TPLINK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Timeout in seconds for each request to the switch (overrides config)
    #[arg(long, env = "TPLINK_TIMEOUT_SECONDS")]
    timeout: Option<u64>,

    /// Port to listen on for metrics
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting TP-Link Switch Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(host) = args.host {
        config.switch.host = host;
    }
    if let Some(username) = args.username {
        config.switch.username = username;
    }
    if let Some(password) = args.password {
        config.switch.password = Some(secrecy::SecretString::new(password.into()));
    }
    if let Some(timeout) = args.timeout {
        config.switch.request_timeout_seconds = timeout;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(2);
    }

    info!("Configuration loaded successfully");
    info!("Switch host: {} (user {})", config.switch.host, config.switch.username);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
