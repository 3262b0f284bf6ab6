use std::net::SocketAddr;

use axum::Router;
use chrono::Duration;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::{info, warn};

use configs::AppConfig;
use service::auth::{service::AuthConfig, TokenIssuer};

use crate::errors::expose_internal_details;
use crate::routes;
use crate::state::ServerState;

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e) => warn!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

/// Build the router for an already-prepared state.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state)
}

/// Public entry: connect, migrate, serve until a shutdown signal, then close
/// the pool.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    expose_internal_details(cfg.server.mode.is_development());

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let tokens = TokenIssuer::new(&cfg.auth.jwt_secret, Duration::hours(cfg.auth.token_ttl_hours));
    let state = ServerState::with_database(db.clone(), tokens, AuthConfig::default());

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, mode = ?cfg.server.mode, "server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("database pool closed");
    Ok(())
}
