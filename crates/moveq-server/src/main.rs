mod api;
mod middleware;

use std::sync::Arc;

use moveq_core::PricingPolicy;
use moveq_maps::{DistanceMatrixClient, ProviderConfig, Units};
use moveq_quote::{DistanceResolver, PgRecordStore, QuoteCalculator, RecordStore};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = moveq_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = moveq_db::PoolConfig::from_app_config(&config);
    let pool = moveq_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = moveq_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    if config.maps_api_key.is_none() {
        tracing::warn!("MOVEQ_MAPS_API_KEY not set; uncached distances will price as zero miles");
    }
    let client = DistanceMatrixClient::new(&ProviderConfig {
        api_key: config.maps_api_key.clone(),
        base_url: config.maps_base_url.clone(),
        timeout_secs: config.maps_timeout_secs,
        units: Units::Imperial,
    })?;

    let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(pool.clone()));
    let resolver = DistanceResolver::new(Arc::new(client), Arc::clone(&store));
    let calculator = Arc::new(QuoteCalculator::new(resolver, PricingPolicy::default()));

    let app = build_app(
        AppState {
            pool,
            store,
            calculator,
        },
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "moveq-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
