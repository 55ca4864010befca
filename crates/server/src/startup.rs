use std::{future::Future, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{repository::SeaOrmProductRepository, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind host/port from the server section; host names are resolved
async fn bind_listener(cfg: &ServerConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .map_err(|source| StartupError::Bind { addr: format!("{}:{}", cfg.host, cfg.port), source })
}

/// Open (and migrate) the store and wrap it in handler state
pub async fn build_state(cfg: &DatabaseConfig) -> Result<ServerState, StartupError> {
    runtime::ensure_database_dir(&cfg.url)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let db = models::db::connect_and_migrate(cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Ok(ServerState::new(Arc::new(SeaOrmProductRepository::new(db))))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve the catalog on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: open the store, bind and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg.database).await?;

    let listener = bind_listener(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, database = %cfg.database.url, "catalog server listening");

    serve(listener, state, shutdown_signal()).await?;
    Ok(())
}
