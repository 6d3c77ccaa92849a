use anyhow::Context;
use campus_events::api::rest::{AppState, create_router};
use campus_events::application::EventRepository;
use campus_events::config::AppConfig;
use campus_events::infrastructure::persistence::{self, fixtures};
use campus_events::telemetry;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(backend = ?config.store.backend, "Connecting to event store...");
    let store = persistence::connect(&config.store)
        .await
        .context("failed to open event store")?;

    if config.seed_demo_data {
        fixtures::seed_demo_events(store.as_ref())
            .await
            .context("failed to seed demo events")?;
    }

    let router = create_router(AppState::new(EventRepository::new(store)), &config.server);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(
        %address,
        static_dir = %config.server.static_dir.display(),
        "Server running"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
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
