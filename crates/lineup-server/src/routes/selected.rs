use axum::extract::{Query, State};
use axum::Json;
use lineup_core::queue::Intent;
use lineup_core::store::ElementId;
use lineup_core::LineupError;

use crate::error::AppError;
use crate::pagination::{paginate, Page, PageQuery};
use crate::state::AppState;

/// GET /api/selected — selected elements in display order, paginated.
pub async fn list_selected(
    State(app): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Page> {
    let ids = app.store.read().list_selected_ordered();
    Json(paginate(ids, &query, app.default_page_size))
}

#[derive(serde::Deserialize)]
pub struct IdBody {
    pub id: ElementId,
}

/// POST /api/select — queue a selection for the next fast-lane flush.
pub async fn select_element(
    State(app): State<AppState>,
    Json(body): Json<IdBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    {
        let store = app.store.read();
        if !store.exists(body.id) {
            return Err(LineupError::ElementNotFound(body.id).into());
        }
        if store.is_selected(body.id) {
            return Err(LineupError::AlreadySelected(body.id).into());
        }
    }

    app.queue.submit(Intent::Select { id: body.id });

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "request queued",
    })))
}

/// POST /api/deselect — queue a deselection for the next fast-lane flush.
pub async fn deselect_element(
    State(app): State<AppState>,
    Json(body): Json<IdBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !app.store.read().is_selected(body.id) {
        return Err(LineupError::NotSelected(body.id).into());
    }

    app.queue.submit(Intent::Deselect { id: body.id });

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "request queued",
    })))
}

#[derive(serde::Deserialize)]
pub struct SortBody {
    pub order: Vec<ElementId>,
}

/// POST /api/sort — queue a display-order replacement. Only the most recent
/// order submitted before a flush survives.
pub async fn sort_elements(
    State(app): State<AppState>,
    Json(body): Json<SortBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.queue.submit(Intent::Sort { order: body.order });

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "request queued",
    })))
}
