use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState};
use service::{auth, runtime, upload::UploadStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise environment only.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        AppConfig::load_and_validate()
    } else {
        AppConfig::from_env()
    }
}

/// Connect, migrate, wire services and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.server.frontend_dir, &cfg.uploads.dir).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let strategy = auth::from_config(&cfg.auth);
    info!(strategy = strategy.name(), "auth strategy selected");
    let uploads = Arc::new(UploadStore::new(&cfg.uploads.dir));
    let state = ServerState::new(db, strategy, uploads);

    Ok(routes::build_router(state, build_cors(), &cfg.server.frontend_dir))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
