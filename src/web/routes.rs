use super::handlers;
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Room for the text fields and multipart framing around an upload.
const FORM_OVERHEAD: usize = 1024 * 1024;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::public::index))
        .route("/media/:id", get(handlers::public::serve_media))
        .route("/static/gallery.css", get(handlers::public::stylesheet))
        .route("/health", get(handlers::public::health))
        .route("/api/items", get(handlers::api::list_items))
        .route("/api/views", get(handlers::api::views))
}

pub fn admin_routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    let upload_limit = DefaultBodyLimit::max(max_upload_bytes.saturating_add(FORM_OVERHEAD));

    Router::new()
        .route("/admin/login", get(handlers::auth::login_form))
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        .route(
            "/admin/items",
            post(handlers::admin::create_item).layer(upload_limit),
        )
        .route(
            "/admin/items/:id",
            post(handlers::admin::update_item).layer(upload_limit),
        )
        .route(
            "/admin/items/:id/delete",
            post(handlers::admin::delete_item),
        )
}
