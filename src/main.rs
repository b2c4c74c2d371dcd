//! pinger - HTTP ping server
//!
//! Probes a target URL with GET or HEAD on request and reports latency,
//! status, headers and body size as JSON.

mod config;
mod probe;
mod web;

#[cfg(test)]
mod test_support;

use config::ServerConfig;
use web::Server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("pinger=info".parse()?))
        .init();

    let cfg = ServerConfig::load();
    tracing::info!("Starting pinger on port {}...", cfg.http_port);
    match &cfg.fixed_url {
        Some(url) => tracing::info!("Probing fixed target {}", url),
        None => tracing::info!("Default target is {}", cfg.default_url),
    }
    if !cfg.strict_status {
        tracing::info!("Non-200 upstream responses are reported as successes");
    }

    let server = Server::new(cfg);
    if let Err(e) = server.start().await {
        tracing::error!("Server failed: {}", e);
        return Err(e);
    }

    Ok(())
}
