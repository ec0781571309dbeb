//! Dashboard server: loads config, prepares the database, serves invoice routes.
//!
//! Run from repo root: `cargo run -p invoice-server`

use invoice_actions::{
    common_routes_with_ready, ensure_database_exists, ensure_invoice_table, invoice_routes, AppConfig, AppState,
    MemoryViewCache, PgInvoiceStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("invoice_actions=info,invoice_server=info")),
        )
        .init();

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_invoice_table(&pool, &config.schema).await?;

    let store = Arc::new(PgInvoiceStore::new(pool, config.schema.clone()));
    let state = AppState::new(store, Arc::new(MemoryViewCache::new()));

    let app = axum::Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(invoice_routes(state, config.form_body_limit));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
