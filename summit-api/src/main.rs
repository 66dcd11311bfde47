use anyhow::Context;
use std::sync::Arc;
use summit_api::{app, AppState};
use summit_core::payment::MockPaymentGateway;
use summit_store::{Config, MemStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "summit_api=debug,summit_store=debug,summit_core=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Summit API on port {}", config.server.port);

    let storage = Arc::new(MemStorage::new(&config.booking));
    let app_state = AppState::new(storage, Arc::new(MockPaymentGateway));

    let app = app(app_state);

    let addr = config
        .server
        .socket_addr()
        .context("Invalid server host/port")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
