//! Appointment Booking Backend
//!
//! JWT login plus role-gated CRUD over an in-memory appointment list.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: login and appointment operations, audit logging
//! - Auth: token service, credential store and access guard
//! - Repositories: in-memory appointment storage

use anyhow::Result;
use appointment_booking_backend::{config, routes, state::AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Appointment Booking Backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    if config.credentials.is_empty() {
        warn!("No credentials configured; every login will fail");
    }

    let state = AppState::new(config);
    info!(
        credentials = state.guard().credentials().len(),
        algorithm = ?state.jwt().algorithm(),
        token_ttl_secs = state.jwt().access_token_expiry_secs(),
        "Access guard initialised"
    );

    let addr = format!("{}:{}", state.config().server.host, state.config().server.port);
    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "appointment_booking_backend=info,tower_http=info".into()
        } else {
            "appointment_booking_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.jwt.secret == config::DEVELOPMENT_SECRET || config.jwt.secret.len() < 32 {
        errors.push("JWT secret must be at least 32 characters and not the development default");
    }

    let default_passwords = config
        .credentials
        .iter()
        .filter(|c| {
            (c.username == "admin" && c.password == "admin123")
                || (c.username == "user" && c.password == "user123")
        })
        .count();
    if default_passwords > 0 {
        warn!(count = default_passwords, "Default demo credentials are enabled in production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
