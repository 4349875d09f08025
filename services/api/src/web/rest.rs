//! services/api/src/web/rest.rs
//!
//! Root and health endpoints, and the master definition for the OpenAPI
//! specification.

use crate::web::state::AppState;
use crate::web::{admin, auth, credits, models, stories, topics, users};
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        health_handler,
        auth::register_handler,
        auth::login_handler,
        auth::google_session_handler,
        auth::admin_login_handler,
        auth::me_handler,
        auth::logout_handler,
        topics::list_topics_handler,
        topics::get_topic_handler,
        topics::list_subtopics_handler,
        topics::get_subtopic_handler,
        topics::all_subtopics_handler,
        topics::search_kazanim_handler,
        stories::list_stories_handler,
        stories::popular_stories_handler,
        stories::get_story_handler,
        stories::get_story_by_slug_handler,
        stories::generate_story_handler,
        stories::play_story_handler,
        stories::delete_story_handler,
        users::get_profile_handler,
        users::update_profile_handler,
        users::credits_handler,
        users::my_stories_handler,
        users::delete_my_story_handler,
        users::list_favorites_handler,
        users::check_favorite_handler,
        users::add_favorite_handler,
        users::remove_favorite_handler,
        users::public_profile_handler,
        credits::create_credit_request_handler,
        credits::my_credit_requests_handler,
        admin::stats_handler,
        admin::list_users_handler,
        admin::update_user_handler,
        admin::delete_user_handler,
        admin::list_stories_handler,
        admin::delete_story_handler,
        admin::update_story_handler,
        admin::backfill_slugs_handler,
        admin::list_credit_requests_handler,
        admin::update_credit_request_handler,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::OAuthSessionRequest,
            auth::RegisterResponse,
            auth::AuthResponse,
            stories::GenerateStoryRequest,
            stories::PlayCountResponse,
            users::UpdateProfileRequest,
            users::ProfileResponse,
            users::FavoriteStatusResponse,
            users::CreditsResponse,
            users::PublicProfileResponse,
            credits::CreateCreditRequest,
            admin::UserListResponse,
            admin::StoryListResponse,
            admin::AdminUpdateUserRequest,
            admin::UpdateStoryTitleRequest,
            admin::UpdateCreditRequestRequest,
            admin::BackfillResponse,
            models::UserResponse,
            models::PublicUserResponse,
            models::StoryResponse,
            models::TopicSummary,
            models::TopicDetail,
            models::SubtopicView,
            models::SubtopicEntryView,
            models::CreditRequestResponse,
            models::StatsResponse,
            models::MessageResponse,
        )
    ),
    tags(
        (name = "Masal Sepeti API", description = "Turkish children's stories with narration, accounts and credits.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

#[derive(Serialize, ToSchema, Debug)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// `connected` or `disconnected`.
    pub database: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// GET /api - Welcome message
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Welcome message", body = RootResponse))
)]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Masal Sepeti API'sine Hoş Geldiniz!".to_string(),
    })
}

/// GET /api/health - Liveness plus a database round trip
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
            }),
        ),
        Err(e) => {
            warn!("Health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "disconnected".to_string(),
                }),
            )
        }
    }
}
