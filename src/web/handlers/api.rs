use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

/// GET /api/items
pub async fn list_items(State(state): State<Arc<AppState>>) -> AppResult<Json<serde_json::Value>> {
    let items = state.gallery.listing()?;
    Ok(Json(serde_json::json!({
        "data": items,
        "meta": { "total": items.len() },
    })))
}

/// GET /api/views
pub async fn views(State(state): State<Arc<AppState>>) -> AppResult<Json<serde_json::Value>> {
    let views = state.gallery.view_count()?;
    Ok(Json(serde_json::json!({ "views": views })))
}
