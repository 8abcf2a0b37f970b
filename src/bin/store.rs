//! Roster reference store
//!
//! Serves the `record` resource from memory so the `roster` client has
//! something to talk to during development.
//!
//! # Configuration
//!
//! Environment variables:
//! - `ROSTER_STORE_PORT`: Port to listen on (default: 5050)
//! - `RUST_LOG`: Log filter (default: `roster=info,tower_http=info`)

use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster::server::{router, AppState, MemoryStore};

const DEFAULT_PORT: u16 = 5050;

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("ROSTER_STORE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { port }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Config::from_env()).await {
        tracing::error!("Store exited: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new(MemoryStore::new())).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting record store on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
