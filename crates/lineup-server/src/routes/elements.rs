use axum::extract::{Query, State};
use axum::Json;
use lineup_core::queue::Intent;
use lineup_core::store::ElementId;
use lineup_core::LineupError;

use crate::error::AppError;
use crate::pagination::{paginate, Page, PageQuery};
use crate::state::AppState;

/// GET /api/elements — unselected elements, paginated.
pub async fn list_unselected(
    State(app): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Page> {
    let ids = app.store.read().list_unselected();
    Json(paginate(ids, &query, app.default_page_size))
}

#[derive(serde::Deserialize)]
pub struct AddBody {
    pub id: ElementId,
}

/// POST /api/add — queue a new element for the next slow-lane flush.
pub async fn add_element(
    State(app): State<AppState>,
    Json(body): Json<AddBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if app.store.read().exists(body.id) {
        return Err(LineupError::ElementExists(body.id).into());
    }

    app.queue.submit(Intent::Add { id: body.id });

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "request queued",
    })))
}
