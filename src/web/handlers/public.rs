use crate::services::media;
use crate::web::error::AppResult;
use crate::web::extractors::IsAdmin;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

pub fn make_context(state: &AppState, is_admin: bool) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("is_admin", &is_admin);
    ctx.insert("admin_enabled", &state.gate.is_configured());
    ctx
}

#[derive(Deserialize)]
pub struct Notice {
    notice: Option<String>,
}

fn notice_text(code: &str) -> Option<&'static str> {
    match code {
        "added" => Some("Item added to the gallery."),
        "updated" => Some("Item updated."),
        "deleted" => Some("Item deleted."),
        "logged-in" => Some("Admin access granted."),
        "logged-out" => Some("Logged out."),
        _ => None,
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
    Query(query): Query<Notice>,
) -> AppResult<Html<String>> {
    let views = state.gallery.record_view()?;
    let items = state.gallery.listing()?;

    let mut ctx = make_context(&state, is_admin);
    ctx.insert("items", &items);
    ctx.insert("views", &views);
    if let Some(text) = query.notice.as_deref().and_then(notice_text) {
        ctx.insert("notice", text);
    }

    let html = state.templates.render("index.html", &ctx)?;
    Ok(Html(html))
}

pub async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let item = match state.gallery.get(id)? {
        Some(item) => item,
        None => return Ok(StatusCode::NOT_FOUND.into_response()),
    };

    let mime = media::content_type(&item.media, item.media_type);
    Ok(([(header::CONTENT_TYPE, mime)], item.media).into_response())
}

pub async fn stylesheet(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let css = state.templates.render("css/gallery.css", &Context::new())?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response())
}

pub async fn health() -> &'static str {
    "ok"
}
