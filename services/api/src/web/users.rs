//! services/api/src/web/users.rs
//!
//! Self-service endpoints for the signed-in user (profile, own stories,
//! favorites, credit balance) and the public author profile.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use masal_core::domain::{ProfileUpdate, StoryQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::web::middleware::CurrentUser;
use crate::web::models::{MessageResponse, PublicUserResponse, StoryResponse, UserResponse};
use crate::web::state::AppState;
use crate::web::stories::{delete_owned_story, enrich_stories, load_story, parse_story_id};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct FavoriteStatusResponse {
    pub story_id: Uuid,
    pub is_favorite: bool,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct CreditsResponse {
    pub credits: i64,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PublicProfileResponse {
    pub user: PublicUserResponse,
    pub stories: Vec<StoryResponse>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

//=========================================================================================
// Profile
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_profile_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Name cannot be blank"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    if matches!(&req.name, Some(name) if name.trim().is_empty()) {
        return Err(ApiError::bad_request("Ad boş olamaz"));
    }
    let update = ProfileUpdate {
        name: non_blank(req.name),
        surname: req.surname.map(|s| s.trim().to_string()),
        phone: non_blank(req.phone),
        picture: non_blank(req.picture),
    };
    let updated = state.db.update_profile(user.user_id, update).await?;
    Ok(Json(ProfileResponse {
        message: "Profil güncellendi".to_string(),
        user: UserResponse::from(&updated),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/credits",
    responses(
        (status = 200, description = "Current credit balance", body = CreditsResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn credits_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<CreditsResponse> {
    Json(CreditsResponse {
        credits: user.credits,
    })
}

//=========================================================================================
// Own Stories
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/users/stories",
    responses(
        (status = 200, description = "Stories created by the user, newest first", body = [StoryResponse]),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn my_stories_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<StoryResponse>>> {
    let query = StoryQuery {
        user_id: Some(user.user_id),
        ..Default::default()
    };
    let stories = state.db.list_stories(&query).await?;
    Ok(Json(enrich_stories(state.db.as_ref(), stories).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn delete_my_story_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let story_id = parse_story_id(&story_id)?;
    delete_owned_story(state.db.as_ref(), &user, story_id).await?;
    Ok(Json(MessageResponse::new("Masal silindi")))
}

//=========================================================================================
// Favorites
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/users/favorites",
    responses(
        (status = 200, description = "Favorite stories", body = [StoryResponse]),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<StoryResponse>>> {
    let stories = state.db.get_stories_by_ids(&user.favorites).await?;
    Ok(Json(enrich_stories(state.db.as_ref(), stories).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/favorites/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Whether the story is a favorite", body = FavoriteStatusResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn check_favorite_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let story_id = parse_story_id(&story_id)?;
    Ok(Json(FavoriteStatusResponse {
        story_id,
        is_favorite: user.favorites.contains(&story_id),
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/favorites/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story added to favorites", body = FavoriteStatusResponse),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let story_id = parse_story_id(&story_id)?;
    load_story(state.db.as_ref(), story_id).await?;
    state.db.add_favorite(user.user_id, story_id).await?;
    Ok(Json(FavoriteStatusResponse {
        story_id,
        is_favorite: true,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/favorites/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story removed from favorites", body = FavoriteStatusResponse)
    )
)]
pub async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let story_id = parse_story_id(&story_id)?;
    state.db.remove_favorite(user.user_id, story_id).await?;
    Ok(Json(FavoriteStatusResponse {
        story_id,
        is_favorite: false,
    }))
}

//=========================================================================================
// Public Profile
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/users/public/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile and stories", body = PublicProfileResponse),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn public_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<PublicProfileResponse>> {
    let not_found = || ApiError::not_found("Kullanıcı bulunamadı");
    let user_id = Uuid::parse_str(&user_id).map_err(|_| not_found())?;
    let user = state
        .db
        .get_users_by_ids(&[user_id])
        .await?
        .into_iter()
        .next()
        .ok_or_else(not_found)?;

    let query = StoryQuery {
        user_id: Some(user_id),
        ..Default::default()
    };
    let stories = state.db.list_stories(&query).await?;
    Ok(Json(PublicProfileResponse {
        user: PublicUserResponse::from(&user),
        stories: enrich_stories(state.db.as_ref(), stories).await?,
    }))
}
