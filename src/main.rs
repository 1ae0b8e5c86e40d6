//! ProEventos API server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Logging  │───▶│  Store   │───▶│ Gateway  │
//! │  (YAML)  │    │(tracing) │    │(PG / mem)│    │  (axum)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use proeventos::config::AppConfig;
use proeventos::gateway::{self, state::AppState, types::set_expose_details};
use proeventos::logging::init_logging;
use proeventos::persistence::{MemoryStore, PgStore, schema::init_schema};

#[derive(Parser, Debug)]
#[command(name = "proeventos", version, about = "Event management REST API")]
struct Args {
    /// Config environment: loads config/{env}.yaml
    #[arg(long, default_value = "dev")]
    env: String,

    /// Override gateway.port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app_config = AppConfig::load(&args.env)?;
    if let Some(port) = args.port {
        app_config.gateway.port = port;
    }
    let _log_guard = init_logging(&app_config)?;

    tracing::info!("Starting ProEventos in {} mode", app_config.environment);
    set_expose_details(app_config.is_development());

    let jwt_secret = app_config.app_settings.token.clone();
    let state = match app_config.connection_strings.default_connection.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            init_schema(store.pool())
                .await
                .context("Failed to initialize database schema")?;
            tracing::info!("✅ PostgreSQL schema ready");
            AppState::new(Arc::new(store), jwt_secret)
        }
        None => {
            tracing::warn!("⚠️  No connection string configured, using the in-memory store");
            AppState::new(Arc::new(MemoryStore::new()), jwt_secret)
        }
    };

    gateway::run_server(&app_config.gateway, Arc::new(state)).await
}
