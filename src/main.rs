use std::sync::Arc;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

use ttirring_api::shared::database::Database;
use ttirring_api::shared::logging::init_tracing;
use ttirring_api::shared::store::{DispatchStore, MemoryStore, PgStore};
use ttirring_api::{build_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 있으면 로드 (없어도 무시)
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    // 저장소 선택: DATABASE_URL 있으면 PostgreSQL, 없으면 데모 인메모리
    let store: Arc<dyn DispatchStore> = match config.database_url.as_deref() {
        Some(db_url) => {
            let db = Database::new(db_url, config.db_max_connections).await?;
            db.initialize().await?;
            tracing::info!("Using PostgreSQL store");
            Arc::new(PgStore::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory demo store");
            Arc::new(MemoryStore::demo())
        }
    };

    let addr = config.bind_addr();
    let env = config.app_env.clone();
    let version = config.app_version.clone();

    // AppState 생성 (모든 Service 초기화)
    let app = build_app(AppState::new(store, config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, %env, %version, "ttirring API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
