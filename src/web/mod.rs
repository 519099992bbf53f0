mod error;
mod extractors;
mod handlers;
mod routes;
pub mod security;
mod state;

pub use error::{AppError, AppResult};
pub use extractors::SESSION_COOKIE;
pub use state::AppState;

use crate::services::auth::AdminGate;
use crate::{Config, Database};
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::public_routes())
        .merge(routes::admin_routes(state.max_upload_bytes))
        .layer(middleware::from_fn(security::apply_security_headers))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, db: Database, gate: AdminGate, addr: &str) -> Result<()> {
    if !gate.is_configured() {
        tracing::warn!(
            "No admin secret configured; set auth.secret_hash or GALLERY_ADMIN_SECRET to enable uploads"
        );
    }

    let state = Arc::new(AppState::new(config, db, gate)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Gallery listening on http://{}", listener.local_addr()?);
    let app = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await?;

    Ok(())
}
