use axum::extract::State;
use axum::Json;
use lineup_core::queue::QueueSizes;

use crate::state::AppState;

/// GET /api/state — selection snapshot for external persistence.
pub async fn get_state(State(app): State<AppState>) -> Json<lineup_core::store::State> {
    Json(app.store.read().state())
}

/// GET /api/queue-status — pending intent counts, for monitoring.
pub async fn queue_status(State(app): State<AppState>) -> Json<QueueSizes> {
    Json(app.queue.queue_sizes())
}
