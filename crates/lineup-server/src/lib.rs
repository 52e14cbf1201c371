pub mod error;
pub mod pagination;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use lineup_core::config::Config;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Catalog
        .route("/api/elements", get(routes::elements::list_unselected))
        .route("/api/add", post(routes::elements::add_element))
        // Selection
        .route("/api/selected", get(routes::selected::list_selected))
        .route("/api/select", post(routes::selected::select_element))
        .route("/api/deselect", post(routes::selected::deselect_element))
        .route("/api/sort", post(routes::selected::sort_elements))
        // Observability
        .route("/api/state", get(routes::state::get_state))
        .route("/api/queue-status", get(routes::state::queue_status))
        .route("/health", get(routes::health::health))
        .layer(cors)
        .with_state(app_state)
}

/// Start the lineup API server.
///
/// Blocks until ctrl-c, then stops the batch queue. Intents queued after the
/// last flush are discarded at shutdown.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(config, listener).await
}

/// Start the lineup API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0`
/// and the OS picks a free port).
pub async fn serve_on(config: &Config, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();

    let app_state = state::AppState::new(config);
    let queue = app_state.queue.clone();
    let app = build_router(app_state);

    tracing::info!("lineup API listening on http://localhost:{actual_port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    queue.stop();
    tracing::info!("flush timers stopped, unflushed intents discarded");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
