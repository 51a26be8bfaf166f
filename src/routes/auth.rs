//! Auth routes: mocked signup/login, session management, role switching.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use super::error::ApiError;
use crate::config::parse_bool;
use crate::domain::user::{User, UserRole};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller, resolved from the session cookie or a bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

impl AuthUser {
    /// # Errors
    ///
    /// `403` unless the caller is a brand or an agency.
    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.user.role.manages_campaigns() {
            Ok(())
        } else {
            Err(ApiError::forbidden("only brands and agencies can do this"))
        }
    }
}

fn bearer_token(parts: &axum::http::request::Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(COOKIE_NAME)
            .map(|c| c.value().to_owned())
            .filter(|t| !t.is_empty())
            .or_else(|| bearer_token(parts))
            .ok_or_else(ApiError::unauthenticated)?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .sessions
            .validate(&token)
            .ok_or_else(ApiError::unauthenticated)?;

        Ok(Self { user, token })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    name: String,
    role: UserRole,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    role: UserRole,
}

#[derive(Deserialize)]
pub struct RoleRequest {
    role: UserRole,
}

#[derive(Serialize)]
pub struct SessionResponse {
    token: String,
    user: User,
}

fn signed_in(jar: CookieJar, token: String, user: User) -> impl IntoResponse {
    let jar = jar.add(session_cookie(token.clone()));
    (jar, Json(SessionResponse { token, user }))
}

/// `POST /api/auth/signup` — create an account and open a session.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.sessions.signup(&body.email, &body.name, body.role)?;
    Ok(signed_in(jar, token, user))
}

/// `POST /api/auth/login` — resume (or create) the account for an email.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.sessions.login(&body.email, body.role)?;
    Ok(signed_in(jar, token, user))
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/role` — switch the caller's role.
pub async fn switch_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<RoleRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.sessions.switch_role(&auth.token, body.role)?))
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    state.sessions.logout(&auth.token);

    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
