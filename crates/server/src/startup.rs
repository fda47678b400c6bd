use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::user::hasher::Argon2Hasher;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect the pool, apply migrations when enabled, assemble services.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let hasher = Argon2Hasher::new(&cfg.password).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    } else {
        warn!("run_migrations disabled; schema assumed current");
    }

    Ok(AppState::with_database(db, Arc::new(hasher)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Build the app from `cfg` and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting quotedesk server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 9090);
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
