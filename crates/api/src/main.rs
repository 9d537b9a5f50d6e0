use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glavtrub_api::config::ServerConfig;
use glavtrub_api::router::build_app_router;
use glavtrub_api::state::AppState;
use glavtrub_events::{EmailConfig, EmailDelivery, EventBus, LeadDispatcher, TelegramDelivery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "glavtrub_api=debug,glavtrub_events=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
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

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, site = %config.site.url, "Loaded server configuration");

    // --- Database ---
    let pool = glavtrub_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    glavtrub_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    glavtrub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir {}", config.upload_dir.display()))?;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    let email = EmailConfig::from_env().map(EmailDelivery::new);
    if email.is_none() {
        tracing::warn!("SMTP_HOST not set, lead emails disabled");
    }
    let dispatcher = LeadDispatcher::new(pool.clone(), email, TelegramDelivery::new());
    let dispatcher_handle = tokio::spawn(dispatcher.run(event_bus.subscribe()));
    tracing::info!("Lead dispatcher started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel and ends the dispatcher
    // loop once queued leads are delivered.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM (on Unix) to start a graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
