mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use dealflow_db::PgRecommendationSource;
use dealflow_ranking::{CacheConfig, RecommendationCache};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealflow_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let thresholds = dealflow_core::resolve_tiers(config.tiers_path.as_deref())?;

    let pool = dealflow_db::connect_pool_from_config(&config).await?;
    let applied = dealflow_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let cache = Arc::new(RecommendationCache::new(
        Arc::new(PgRecommendationSource::new(pool.clone())),
        thresholds,
        CacheConfig::from_app_config(&config),
    ));

    let _scheduler = scheduler::build_scheduler(Arc::clone(&cache)).await?;

    let state = AppState {
        pool,
        cache,
        default_limit: config.recommendation_default_limit,
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "dealflow-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
