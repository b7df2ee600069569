//! Router assembly and the serve loop.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::routes::{api_info, fhir, health, lookup, not_found, users};
use crate::state::ServerState;

/// Build the router with all routes and middleware.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/lookup", post(lookup::lookup))
        .route("/save_lookup", post(lookup::save_lookup))
        .route("/users", post(users::create_user))
        .route("/login", post(users::login))
        .route("/profile/{user_id}", get(users::profile))
        .route("/fhir_resource", post(fhir::fhir_resource))
        .route("/fhir_bundle", post(fhir::fhir_bundle))
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load tables and history per `config`, then serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let state = Arc::new(ServerState::load(config)?);

    info!(
        %addr,
        timeout_secs = state.config.timeout_secs,
        cors = state.config.enable_cors,
        "starting AYUSH lookup server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
