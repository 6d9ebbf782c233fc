//! Salon entitlements service binary.

use std::error::Error;
use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use salon_entitlements::adapters::billing::{HttpTierSource, HttpTierSourceConfig, StubTierSource};
use salon_entitlements::adapters::http::{api_router, EntitlementsAppState};
use salon_entitlements::config::{AppConfig, BillingConfig};
use salon_entitlements::ports::TierSource;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_tier_source(billing: &BillingConfig) -> Result<Arc<dyn TierSource>, Box<dyn Error>> {
    match &billing.status_url {
        Some(url) => {
            let config = HttpTierSourceConfig::new(url.clone())
                .with_secret_api_key(billing.api_key.clone())
                .with_timeout(billing.request_timeout());
            tracing::info!(status_url = %url, "Using billing status endpoint");
            Ok(Arc::new(HttpTierSource::new(config)?))
        }
        None => {
            tracing::warn!("No billing status URL configured; every user resolves to the free tier");
            Ok(Arc::new(StubTierSource::new()))
        }
    }
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
    tracing::info!("Shutdown signal received");
}

// A listener that cannot be installed never resolves, so the server keeps running.
async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal; serving until killed");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let tier_source = build_tier_source(&config.billing)?;
    let app = api_router(EntitlementsAppState::new(tier_source))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Entitlements API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
