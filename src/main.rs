use std::sync::Arc;

use anyhow::Context;

use playmart_api::config::AppConfig;
use playmart_api::store::Store;
use playmart_api::{app, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // A missing signing secret is startup-fatal.
    let config = AppConfig::from_env().context("invalid configuration")?;

    let store = Store::connect(&config.database)
        .await
        .context("failed to initialize document store")?;

    // The toy-name text index must exist before the first search query.
    store
        .ensure_indexes()
        .await
        .context("failed to ensure toy text index")?;

    let port = config.port;
    let ctx = AppContext {
        store,
        config: Arc::new(config),
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("PlayMart API listening on http://{}", bind_addr);

    axum::serve(listener, app(ctx)).await.context("server")?;
    Ok(())
}
