//! Service entry point: configuration, database, HTTP server.

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pelorus_api::{db, routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "pelorus_api=info,pelorus_intel=info,pelorus_screening=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Missing provider credentials or database settings are fatal here,
    // before the listener ever opens.
    let config = Config::from_env().context("configuration")?;

    let pool = db::init_pool(&config.database_url)
        .await
        .context("database connection")?;

    let state = AppState::new(&config, pool).map_err(|e| anyhow::anyhow!("{e}"))?;

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "pelorus screening API listening");

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
