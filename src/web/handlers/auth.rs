use crate::services::auth;
use crate::web::error::AppResult;
use crate::web::extractors::{IsAdmin, SESSION_COOKIE};
use crate::web::handlers::public::make_context;
use crate::web::state::AppState;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use time::Duration;

pub async fn login_form(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Response> {
    if is_admin {
        return Ok(Redirect::to("/").into_response());
    }

    let ctx = make_context(&state, false);
    let html = state.templates.render("login.html", &ctx)?;
    Ok(Html(html).into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    secret: String,
}

fn render_login_error(
    state: &AppState,
    status: StatusCode,
    message: &str,
) -> AppResult<Response> {
    let mut ctx = make_context(state, false);
    ctx.insert("error", message);
    let html = state.templates.render("login.html", &ctx)?;
    Ok((status, Html(html)).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let rate_key = format!("login:{}", client);

    if !state.login_limiter.check(&rate_key) {
        tracing::warn!(client = %client, "Admin login throttled");
        return render_login_error(
            &state,
            StatusCode::TOO_MANY_REQUESTS,
            "Too many attempts. Please wait before trying again.",
        );
    }

    if !state.gate.authorize(&form.secret) {
        state.login_limiter.cleanup();
        state.login_limiter.record_attempt(&rate_key);
        tracing::warn!(client = %client, "Rejected admin login");
        return render_login_error(&state, StatusCode::UNAUTHORIZED, "Incorrect password");
    }

    state.login_limiter.clear(&rate_key);
    state.login_limiter.cleanup();
    let removed = auth::cleanup_expired_sessions(&state.db)?;
    if removed > 0 {
        tracing::debug!("Removed {} expired session(s)", removed);
    }

    let token = auth::create_session(&state.db, state.session_days)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(state.session_days))
        .build();

    tracing::info!(client = %client, "Admin logged in");
    Ok((jar.add(cookie), Redirect::to("/?notice=logged-in")).into_response())
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        auth::delete_session(&state.db, cookie.value())?;
    }

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    Ok((jar.remove(cookie), Redirect::to("/?notice=logged-out")).into_response())
}
