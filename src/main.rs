use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};

use tagvote::application::ports::video_search_port::VideoSearchPort;
use tagvote::bootstrap::app_context::{AppContext, AppServices};
use tagvote::bootstrap::config::Config;
use tagvote::infrastructure::db::repositories::vote_repository_sqlx::SqlxVoteRepository;
use tagvote::infrastructure::search::youtube_reqwest::ReqwestVideoSearch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "tagvote=debug,tower_http=info,axum=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting tagvote backend");

    // Database
    let pool = tagvote::infrastructure::db::connect_pool(&cfg.database, &cfg.pool).await?;
    tagvote::infrastructure::db::migrate(&pool).await?;

    let vote_repo = Arc::new(SqlxVoteRepository::new(pool.clone()));
    let video_search: Option<Arc<dyn VideoSearchPort>> = match &cfg.youtube_api_key {
        Some(key) => Some(Arc::new(ReqwestVideoSearch::new(
            &cfg.search_base_url,
            key.clone(),
            Duration::from_secs(cfg.search_timeout_secs),
        )?)),
        None => {
            warn!("YOUTUBE_API_KEY not set, search proxy disabled");
            None
        }
    };

    let ctx = AppContext::new(AppServices::new(vote_repo, video_search));
    let app = tagvote::presentation::http::router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = ?e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = ?e, "failed to install terminate handler");
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
