//! Weather Forecast Proxy
//!
//! A single-endpoint reverse proxy built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                WEATHER PROXY                  │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ parameter │──▶│ upstream │──┼──▶ Forecast
//!                    │  │ server  │   │ validator │   │  client  │  │     API
//!                    │  └─────────┘   └───────────┘   └────┬─────┘  │
//!                    │                                     │        │
//!                    │                              ┌──────▼─────┐  │
//!   Client Response  │  ┌──────────┐   ┌────────┐   │ TTL reply  │  │
//!   ◀────────────────┼──│ response │◀──│  CORS  │◀──│   cache    │  │
//!                    │  │ composer │   │resolver│   └────────────┘  │
//!                    │  └──────────┘   └────────┘                   │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │         Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌────────┐  │ │
//!                    │  │  │ config │ │observability│ │security│  │ │
//!                    │  │  └────────┘ └─────────────┘ └────────┘  │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use weather_proxy::config::load_config;
use weather_proxy::observability::{logging, metrics};
use weather_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "weather-proxy")]
#[command(about = "Forecast API reverse proxy with CORS allow-list enforcement", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("weather-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        cache_enabled = config.cache.enabled,
        cache_ttl_secs = config.cache.ttl_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
