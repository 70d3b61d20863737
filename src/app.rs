/*
 * Responsibility
 * - Tracing / panic hook setup
 * - Config → services → Router
 * - Serve until Ctrl-C / SIGTERM
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::authz::build_authz_service;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,authz_filter=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so the panic is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        public_key = ?config.public_key,
        validate_subscription = config.validate_subscription,
        "starting authorization filter"
    );

    let state = build_state(&config)?;
    let app = middleware::http::apply(build_router(state), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("authorization filter stopped");
    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let authz = build_authz_service(config).context("failed to load public key")?;
    Ok(AppState::new(authz, config.attributes.clone()))
}

pub fn build_router(state: AppState) -> Router {
    api::routes().with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
