use std::sync::Arc;

use anyhow::Context;

use user_api_rust::auth::TokenService;
use user_api_rust::config::AppConfig;
use user_api_rust::store::PgStore;
use user_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Fail fast on missing configuration: no signing secret or store URL
    // means no server, never a silent insecure default.
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // The process terminates if the store cannot be reached at startup.
    let store = PgStore::connect(&config.database_url)
        .await
        .context("failed to connect to store")?;
    tracing::info!("store connection established");

    let state = AppState {
        store: Arc::new(store),
        tokens: TokenService::new(&config.jwt_secret, config.jwt_expiry_hours),
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("user API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server")?;

    Ok(())
}
