//! services/api/src/web/credits.rs
//!
//! Credit requests raised by users. Approval lives in the admin endpoints.

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use masal_core::domain::{CreditRequest, CreditRequestStatus};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::web::middleware::CurrentUser;
use crate::web::models::CreditRequestResponse;
use crate::web::state::AppState;

pub const MAX_REQUESTED_CREDITS: i64 = 100;

fn default_requested_credits() -> i64 {
    10
}

#[derive(Deserialize, ToSchema)]
pub struct CreateCreditRequest {
    #[serde(default = "default_requested_credits")]
    pub requested_credits: i64,
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/credits/request",
    request_body = CreateCreditRequest,
    responses(
        (status = 201, description = "Request recorded", body = CreditRequestResponse),
        (status = 400, description = "Requested amount out of range"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn create_credit_request_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateCreditRequest>,
) -> ApiResult<(StatusCode, Json<CreditRequestResponse>)> {
    if !(1..=MAX_REQUESTED_CREDITS).contains(&req.requested_credits) {
        return Err(ApiError::bad_request(format!(
            "Kredi miktarı 1 ile {MAX_REQUESTED_CREDITS} arasında olmalıdır"
        )));
    }
    let request = CreditRequest {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        user_name: user.full_name(),
        user_email: user.email.clone(),
        user_phone: user.phone.clone(),
        requested_credits: req.requested_credits,
        message: req.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
        status: CreditRequestStatus::Pending,
        created_at: Utc::now(),
    };
    state.db.create_credit_request(&request).await?;
    info!(
        "Credit request {} created by {} for {} credits",
        request.id, user.user_id, request.requested_credits
    );
    Ok((StatusCode::CREATED, Json(CreditRequestResponse::from(request))))
}

#[utoipa::path(
    get,
    path = "/api/credits/requests",
    responses(
        (status = 200, description = "Own credit requests, newest first", body = [CreditRequestResponse]),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn my_credit_requests_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<CreditRequestResponse>>> {
    let requests = state.db.list_credit_requests(Some(user.user_id)).await?;
    Ok(Json(
        requests.into_iter().map(CreditRequestResponse::from).collect(),
    ))
}
