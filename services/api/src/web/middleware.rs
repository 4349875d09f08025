//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes, plus the extractors
//! handlers use to read the signed-in user.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use masal_core::domain::User;
use masal_core::ServiceError;
use std::sync::Arc;

use crate::error::ApiError;
use crate::session::token_from_headers;
use crate::web::state::AppState;

/// The authenticated user, placed in request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// The user if a valid session was presented, `None` for anonymous callers.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<User>);

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = token_from_headers(headers)
        .ok_or_else(|| ApiError::unauthorized("Oturum açmanız gerekiyor"))?;
    Ok(state.sessions.resolve(&token).await?)
}

/// Middleware that resolves the session (cookie, then bearer token) and
/// inserts the [`CurrentUser`] into request extensions.
/// If the session is missing, unknown or expired, returns 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Like [`require_auth`], but additionally rejects non-admins with 403.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, req.headers()).await?;
    if !user.is_admin() {
        return Err(ApiError::forbidden("Bu işlem için yönetici yetkisi gerekiyor"));
    }
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    /// Uses the user placed by the middleware, or resolves the session itself
    /// on routes that are not behind it.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let user = authenticate(state, &parts.headers).await?;
        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = ApiError;

    /// An invalid or expired token counts as anonymous; storage failures
    /// still surface.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
            return Ok(MaybeUser(Some(user.clone())));
        }
        match authenticate(state, &parts.headers).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(ApiError::Service(ServiceError::Auth(_))) => Ok(MaybeUser(None)),
            Err(e) => Err(e),
        }
    }
}
