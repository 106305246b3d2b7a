//! Login and session endpoints.
//!
//! Two login surfaces share one credential check: `/auth/login` returns the
//! token as JSON for API clients, `/auth/session` sets it as an `HttpOnly`
//! cookie and redirects, for the HTML login form. `/auth/me` is the guarded
//! probe a client uses to confirm its token still works.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use terrain_auth::Identity;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::guard::CurrentUser;
use crate::json::{LoginRequest, MeResponse, TokenResponse};
use crate::AppState;

/// Name of the session cookie set by `/auth/session`
pub const SESSION_COOKIE: &str = "access_token";

/// Authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/session", post(open_session))
        .route("/auth/me", get(me))
}

/// API login handler. Returns the access token in the response body.
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let identity = check_login(&state, &form)?;
    let token = state.codec.issue(&identity.username)?;

    debug!(username = %identity.username, "Issued access token");
    Ok(Json(TokenResponse::bearer(token)))
}

/// Form login handler. Sets the token as a cookie and redirects to the
/// application root.
async fn open_session(
    State(state): State<AppState>,
    Form(form): Form<LoginRequest>,
) -> Result<Response, AppError> {
    let identity = check_login(&state, &form)?;
    let token = state.codec.issue(&identity.username)?;

    debug!(username = %identity.username, "Opened browser session");
    let headers = [
        (header::LOCATION, "/".to_string()),
        (
            header::SET_COOKIE,
            session_cookie(&token, state.codec.token_ttl().as_secs()),
        ),
    ];
    Ok((StatusCode::SEE_OTHER, headers).into_response())
}

/// Authenticated-account handler.
async fn me(CurrentUser(identity): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: identity.username,
        role: identity.role,
    })
}

/// Shared login path for both surfaces.
///
/// A failed check is always [`AppError::InvalidCredentials`], whatever the
/// underlying cause, so the two HTTP responses stay byte-identical.
fn check_login(state: &AppState, form: &LoginRequest) -> Result<Identity, AppError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    state
        .authenticator
        .authenticate(&form.username, &form.password)?
        .ok_or_else(|| {
            warn!(username = %form.username, "Login attempt failed");
            AppError::InvalidCredentials
        })
}

/// Build the `Set-Cookie` value carrying the session token
fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}
