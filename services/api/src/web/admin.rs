//! services/api/src/web/admin.rs
//!
//! Admin-only endpoints. Every route here sits behind `require_admin`.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use masal_core::domain::{AdminUserUpdate, CreditRequestStatus, Role, StoryQuery, StorySort};
use masal_core::ports::PortError;
use masal_core::slug::{ensure_unique_slug, generate_slug};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::web::middleware::CurrentUser;
use crate::web::models::{
    CreditRequestResponse, MessageResponse, StatsResponse, StoryResponse, UserResponse,
};
use crate::web::state::AppState;
use crate::web::stories::{delete_owned_story, enrich_stories, load_story, parse_story_id};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, ToSchema, Debug)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct StoryListResponse {
    pub stories: Vec<StoryResponse>,
    pub total: usize,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct AdminUpdateUserRequest {
    pub credits: Option<i64>,
    /// `user` or `admin`.
    pub role: Option<String>,
    pub is_verified: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStoryTitleRequest {
    pub title: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateCreditRequestRequest {
    /// `approved` or `rejected`.
    pub status: String,
    /// Credits to grant on approval; defaults to the requested amount.
    pub credits: Option<i64>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct BackfillResponse {
    pub updated: usize,
}

fn user_not_found() -> ApiError {
    ApiError::not_found("Kullanıcı bulunamadı")
}

fn map_user_error(e: PortError) -> ApiError {
    match e {
        PortError::NotFound(_) => user_not_found(),
        other => other.into(),
    }
}

//=========================================================================================
// Dashboard
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = StatsResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    let day_start = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or_else(Utc::now);
    let stats = state.db.dashboard_stats(day_start).await?;
    Ok(Json(StatsResponse::from(stats)))
}

//=========================================================================================
// Users
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses((status = 200, description = "All users, newest first", body = UserListResponse))
)]
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserListResponse>> {
    let users: Vec<UserResponse> = state
        .db
        .list_users()
        .await?
        .iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(UserListResponse {
        total: users.len(),
        users,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid role or negative credits"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    if matches!(req.credits, Some(c) if c < 0) {
        return Err(ApiError::bad_request("Kredi negatif olamaz"));
    }
    let role = req
        .role
        .as_deref()
        .map(|r| r.parse::<Role>())
        .transpose()
        .map_err(|_| ApiError::bad_request("Geçersiz rol"))?;
    let update = AdminUserUpdate {
        credits: req.credits,
        role,
        is_verified: req.is_verified,
    };
    let user = state
        .db
        .admin_update_user(user_id, update)
        .await
        .map_err(map_user_error)?;
    info!("Admin updated user {}", user_id);
    Ok(Json(UserResponse::from(&user)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Admins cannot delete themselves"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    if admin.user_id == user_id {
        return Err(ApiError::bad_request("Kendi hesabınızı silemezsiniz"));
    }
    state.db.delete_user(user_id).await.map_err(map_user_error)?;
    info!("Admin {} deleted user {}", admin.user_id, user_id);
    Ok(Json(MessageResponse::new("Kullanıcı silindi")))
}

//=========================================================================================
// Stories
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/admin/stories",
    responses((status = 200, description = "All stories, newest first", body = StoryListResponse))
)]
pub async fn list_stories_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StoryListResponse>> {
    let query = StoryQuery {
        sort: StorySort::Newest,
        ..Default::default()
    };
    let stories = state.db.list_stories(&query).await?;
    let stories = enrich_stories(state.db.as_ref(), stories).await?;
    Ok(Json(StoryListResponse {
        total: stories.len(),
        stories,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story deleted", body = MessageResponse),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn delete_story_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let story_id = parse_story_id(&story_id)?;
    delete_owned_story(state.db.as_ref(), &admin, story_id).await?;
    Ok(Json(MessageResponse::new("Masal silindi")))
}

/// Renames a story and regenerates its slug from the new title.
#[utoipa::path(
    put,
    path = "/api/admin/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    request_body = UpdateStoryTitleRequest,
    responses(
        (status = 200, description = "Story updated", body = StoryResponse),
        (status = 400, description = "Empty title"),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn update_story_handler(
    State(state): State<Arc<AppState>>,
    Path(story_id): Path<String>,
    Json(req): Json<UpdateStoryTitleRequest>,
) -> ApiResult<Json<StoryResponse>> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("Başlık boş olamaz"));
    }
    let story_id = parse_story_id(&story_id)?;
    let story = load_story(state.db.as_ref(), story_id).await?;

    let base = generate_slug(title, Some(&story.age_group));
    let slug = ensure_unique_slug(state.db.as_ref(), &base, Some(story_id)).await?;
    let updated = state
        .db
        .update_story_title(story_id, title, &slug)
        .await?;
    info!("Story {} renamed, slug now '{}'", story_id, slug);

    let mut enriched = enrich_stories(state.db.as_ref(), vec![updated]).await?;
    enriched
        .pop()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Masal bulunamadı"))
}

/// Assigns slugs to stories saved before slugs existed.
#[utoipa::path(
    post,
    path = "/api/admin/stories/backfill-slugs",
    responses((status = 200, description = "Number of stories that received a slug", body = BackfillResponse))
)]
pub async fn backfill_slugs_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BackfillResponse>> {
    let stories = state.db.stories_without_slug().await?;
    let mut updated = 0;
    for story in stories {
        let base = generate_slug(&story.title, Some(&story.age_group));
        let slug = ensure_unique_slug(state.db.as_ref(), &base, Some(story.id)).await?;
        match state.db.set_story_slug(story.id, &slug).await {
            Ok(()) => updated += 1,
            Err(PortError::Conflict(msg)) => warn!("Skipping story {}: {}", story.id, msg),
            Err(e) => return Err(e.into()),
        }
    }
    info!("Backfilled slugs for {} stories", updated);
    Ok(Json(BackfillResponse { updated }))
}

//=========================================================================================
// Credit Requests
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/admin/credit-requests",
    responses((status = 200, description = "All credit requests, newest first", body = [CreditRequestResponse]))
)]
pub async fn list_credit_requests_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CreditRequestResponse>>> {
    let requests = state.db.list_credit_requests(None).await?;
    Ok(Json(
        requests.into_iter().map(CreditRequestResponse::from).collect(),
    ))
}

/// Approves or rejects a pending request. Approval grants `credits`
/// (or the requested amount) to the requester.
#[utoipa::path(
    put,
    path = "/api/admin/credit-requests/{request_id}",
    params(("request_id" = Uuid, Path, description = "Credit request id")),
    request_body = UpdateCreditRequestRequest,
    responses(
        (status = 200, description = "Request updated", body = CreditRequestResponse),
        (status = 400, description = "Invalid status, amount, or request already decided"),
        (status = 404, description = "Unknown request")
    )
)]
pub async fn update_credit_request_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(request_id): Path<Uuid>,
    Json(req): Json<UpdateCreditRequestRequest>,
) -> ApiResult<Json<CreditRequestResponse>> {
    let status = req
        .status
        .parse::<CreditRequestStatus>()
        .ok()
        .filter(|s| *s != CreditRequestStatus::Pending)
        .ok_or_else(|| ApiError::bad_request("Durum 'approved' veya 'rejected' olmalıdır"))?;

    let grant = match status {
        CreditRequestStatus::Approved => req.credits,
        _ => None,
    };
    if grant.is_some_and(|g| g <= 0) {
        return Err(ApiError::bad_request("Kredi miktarı pozitif olmalıdır"));
    }

    let updated = state
        .db
        .decide_credit_request(request_id, status, grant)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => ApiError::not_found("Kredi talebi bulunamadı"),
            PortError::Conflict(_) => ApiError::bad_request("Bu talep zaten sonuçlandırılmış"),
            other => other.into(),
        })?;

    if status == CreditRequestStatus::Approved {
        info!(
            "Admin {} approved credit request {}: +{} credits for {}",
            admin.user_id,
            request_id,
            grant.unwrap_or(updated.requested_credits),
            updated.user_id
        );
    } else {
        info!("Admin {} rejected credit request {}", admin.user_id, request_id);
    }
    Ok(Json(CreditRequestResponse::from(updated)))
}
