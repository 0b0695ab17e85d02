//! Multi-Tenant Config Dashboard
//!
//! A small admin service for per-customer alert-tuning parameters,
//! built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │               CONFIG DASHBOARD                │
//!                 │                                               │
//!   REST client ──┼─▶ ┌──────┐   ┌───────────┐   ┌─────────────┐ │
//!   HTML form  ───┼─▶ │ http │──▶│ auth gate │──▶│  resolver   │ │
//!                 │   │router│   │ (writes)  │   │ merge/coerce│ │
//!                 │   └──────┘   └───────────┘   └──────┬──────┘ │
//!                 │                                     ▼        │
//!                 │                              ┌─────────────┐ │
//!                 │                              │record store │ │
//!                 │                              │ (JSON file) │ │
//!                 │                              └─────────────┘ │
//!                 └───────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config_dashboard::{HttpServer, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "config_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("config-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env();

    tracing::info!(
        port = settings.port,
        default_customer_id = %settings.default_customer_id,
        store = %settings.store_path.display(),
        auth_configured = settings.admin_token.is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(&settings)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
