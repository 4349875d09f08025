//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: registration, password login, Google sign-in,
//! admin login, the current user and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::session::{clear_session_cookie, session_cookie, token_from_headers, IssuedSession, Registration};
use crate::web::middleware::CurrentUser;
use crate::web::models::{MessageResponse, UserResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of the Google sign-in callback. Older clients send the code as `session_id`.
#[derive(Deserialize, ToSchema)]
pub struct OAuthSessionRequest {
    #[serde(alias = "session_id")]
    pub code: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Returned by every login flow. The token is also set as a cookie.
#[derive(Serialize, ToSchema, Debug)]
pub struct AuthResponse {
    pub session_token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub user: UserResponse,
}

//=========================================================================================
// Handlers
//=========================================================================================

fn session_response(state: &AppState, issued: IssuedSession) -> impl IntoResponse {
    let cookie = session_cookie(&issued.token, issued.max_age, state.config.cookie_secure);
    let body = AuthResponse {
        user: UserResponse::from(&issued.user),
        session_token: issued.token,
        expires_at: issued.expires_at,
    };
    (StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body))
}

/// POST /api/auth/register - Create a new local account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .sessions
        .register(Registration {
            name: req.name,
            surname: req.surname,
            email: req.email,
            phone: req.phone,
            password: req.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Kayıt başarılı. Giriş yapabilirsiniz.".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let issued = state.sessions.login(&req.email, &req.password).await?;
    Ok(session_response(&state, issued))
}

/// POST /api/auth/google/session - Exchange a Google authorization code
#[utoipa::path(
    post,
    path = "/api/auth/google/session",
    request_body = OAuthSessionRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "The provider rejected the code"),
        (status = 500, description = "OAuth is not configured or the provider failed")
    )
)]
pub async fn google_session_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OAuthSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    let issued = state.sessions.oauth_login(&req.code).await?;
    Ok(session_response(&state, issued))
}

/// POST /api/admin/login - Login with the configured admin credentials
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin login successful", body = AuthResponse),
        (status = 401, description = "Invalid admin credentials")
    )
)]
pub async fn admin_login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let issued = state.sessions.admin_login(&req.email, &req.password).await?;
    Ok(session_response(&state, issued))
}

/// GET /api/auth/me - The signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn me_handler(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// POST /api/auth/logout - Delete the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.logout(&token).await?;
    }
    let cookie = clear_session_cookie(state.config.cookie_secure);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Çıkış yapıldı")),
    ))
}
