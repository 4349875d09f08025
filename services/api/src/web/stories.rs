//! services/api/src/web/stories.rs
//!
//! Public story endpoints: listing, lookup, generation, play counting and
//! deletion by the owner or an admin.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use masal_core::domain::{Story, StoryQuery, StorySort, User};
use masal_core::generation::StoryRequest;
use masal_core::ports::{DatabaseService, PortError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::web::middleware::{CurrentUser, MaybeUser};
use crate::web::models::{MessageResponse, StoryResponse};
use crate::web::state::AppState;

pub const DEFAULT_LIST_LIMIT: usize = 20;
pub const MAX_LIST_LIMIT: usize = 100;
const DEFAULT_POPULAR_LIMIT: usize = 6;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, IntoParams, Default)]
pub struct ListStoriesQuery {
    pub topic_id: Option<String>,
    pub subtopic_id: Option<String>,
    /// Substring of title, content, theme or kazanım.
    pub search: Option<String>,
    /// `newest` (default), `oldest` or `popular`.
    pub sort: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, IntoParams)]
pub struct PopularQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateStoryRequest {
    pub topic_id: String,
    pub subtopic_id: Option<String>,
    pub theme: String,
    pub age_group: String,
    pub character: Option<String>,
    /// Steer the story towards the subtopic's kazanım.
    #[serde(default)]
    pub kazanim_based: bool,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PlayCountResponse {
    pub play_count: i64,
}

//=========================================================================================
// Shared Helpers
//=========================================================================================

/// Clamps a requested page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>, default: usize) -> usize {
    match limit {
        Some(n) => n.clamp(1, MAX_LIST_LIMIT as i64) as usize,
        None => default,
    }
}

fn story_not_found() -> ApiError {
    ApiError::not_found("Masal bulunamadı")
}

/// Parses a path id; anything that is not a UUID cannot name a story.
pub(crate) fn parse_story_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| story_not_found())
}

pub(crate) async fn load_story(db: &dyn DatabaseService, story_id: Uuid) -> ApiResult<Story> {
    db.get_story(story_id).await?.ok_or_else(story_not_found)
}

/// Attaches creator name and picture with a single batch user lookup.
pub(crate) async fn enrich_stories(
    db: &dyn DatabaseService,
    stories: Vec<Story>,
) -> ApiResult<Vec<StoryResponse>> {
    let mut author_ids: Vec<Uuid> = stories.iter().filter_map(|s| s.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors: HashMap<Uuid, _> = db
        .get_users_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();
    Ok(stories
        .into_iter()
        .map(|story| {
            let creator = story.user_id.and_then(|id| authors.get(&id));
            StoryResponse::new(story, creator)
        })
        .collect())
}

async fn enrich_one(db: &dyn DatabaseService, story: Story) -> ApiResult<StoryResponse> {
    let mut enriched = enrich_stories(db, vec![story]).await?;
    enriched.pop().ok_or_else(story_not_found)
}

/// Deletes a story if `user` owns it or is an admin.
pub(crate) async fn delete_owned_story(
    db: &dyn DatabaseService,
    user: &User,
    story_id: Uuid,
) -> ApiResult<()> {
    let story = load_story(db, story_id).await?;
    if story.user_id != Some(user.user_id) && !user.is_admin() {
        return Err(ApiError::forbidden("Bu masalı silme yetkiniz yok"));
    }
    db.delete_story(story_id).await?;
    info!("Story {} deleted by {}", story_id, user.user_id);
    Ok(())
}

//=========================================================================================
// Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/stories",
    params(ListStoriesQuery),
    responses(
        (status = 200, description = "Matching stories", body = [StoryResponse]),
        (status = 400, description = "Unknown sort order")
    )
)]
pub async fn list_stories_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListStoriesQuery>,
) -> ApiResult<Json<Vec<StoryResponse>>> {
    let sort = match params.sort.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<StorySort>()
            .map_err(|_| ApiError::bad_request("Geçersiz sıralama"))?,
        None => StorySort::default(),
    };
    let query = StoryQuery {
        topic_id: params.topic_id.filter(|s| !s.is_empty()),
        subtopic_id: params.subtopic_id.filter(|s| !s.is_empty()),
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        user_id: None,
        sort,
        limit: clamp_limit(params.limit, DEFAULT_LIST_LIMIT),
    };
    let stories = state.db.list_stories(&query).await?;
    Ok(Json(enrich_stories(state.db.as_ref(), stories).await?))
}

#[utoipa::path(
    get,
    path = "/api/stories/popular",
    params(PopularQuery),
    responses((status = 200, description = "Most played stories", body = [StoryResponse]))
)]
pub async fn popular_stories_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularQuery>,
) -> ApiResult<Json<Vec<StoryResponse>>> {
    let query = StoryQuery {
        sort: StorySort::Popular,
        limit: clamp_limit(params.limit, DEFAULT_POPULAR_LIMIT),
        ..Default::default()
    };
    let stories = state.db.list_stories(&query).await?;
    Ok(Json(enrich_stories(state.db.as_ref(), stories).await?))
}

/// Looks a story up by id, falling back to its slug for older links.
#[utoipa::path(
    get,
    path = "/api/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story id or slug")),
    responses(
        (status = 200, description = "The story", body = StoryResponse),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn get_story_handler(
    State(state): State<Arc<AppState>>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<StoryResponse>> {
    let by_id = match Uuid::parse_str(&story_id) {
        Ok(id) => state.db.get_story(id).await?,
        Err(_) => None,
    };
    let story = match by_id {
        Some(story) => story,
        None => state
            .db
            .get_story_by_slug(&story_id)
            .await?
            .ok_or_else(story_not_found)?,
    };
    Ok(Json(enrich_one(state.db.as_ref(), story).await?))
}

#[utoipa::path(
    get,
    path = "/api/stories/slug/{slug}",
    params(("slug" = String, Path, description = "SEO slug")),
    responses(
        (status = 200, description = "The story", body = StoryResponse),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn get_story_by_slug_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<StoryResponse>> {
    let story = state
        .db
        .get_story_by_slug(&slug)
        .await?
        .ok_or_else(story_not_found)?;
    Ok(Json(enrich_one(state.db.as_ref(), story).await?))
}

/// Generates, voices and saves a new story. Anonymous callers are allowed;
/// signed-in callers spend one credit.
#[utoipa::path(
    post,
    path = "/api/stories/generate",
    request_body = GenerateStoryRequest,
    responses(
        (status = 200, description = "The new story; `audio_warning` is set when it was saved without audio", body = StoryResponse),
        (status = 400, description = "Invalid topic or content rejected by moderation"),
        (status = 402, description = "No credits left"),
        (status = 500, description = "A provider failed or is not configured")
    )
)]
pub async fn generate_story_handler(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<GenerateStoryRequest>,
) -> ApiResult<Json<StoryResponse>> {
    let request = StoryRequest {
        topic_id: req.topic_id,
        subtopic_id: req.subtopic_id.filter(|s| !s.is_empty()),
        theme: req.theme.trim().to_string(),
        age_group: req.age_group.trim().to_string(),
        character: req.character,
        kazanim_based: req.kazanim_based,
    };
    let generated = state.generator.generate(request, user.as_ref()).await?;

    let mut response = StoryResponse::new(generated.story, user.as_ref());
    response.audio_warning = generated.audio_warning;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/stories/{story_id}/play",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "New play count", body = PlayCountResponse),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn play_story_handler(
    State(state): State<Arc<AppState>>,
    Path(story_id): Path<String>,
) -> ApiResult<Json<PlayCountResponse>> {
    let story_id = parse_story_id(&story_id)?;
    let play_count = state
        .db
        .increment_play_count(story_id)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => story_not_found(),
            other => other.into(),
        })?;
    Ok(Json(PlayCountResponse { play_count }))
}

#[utoipa::path(
    delete,
    path = "/api/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story deleted", body = MessageResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Neither the owner nor an admin"),
        (status = 404, description = "Unknown story")
    )
)]
pub async fn delete_story_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(story_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let story_id = parse_story_id(&story_id)?;
    delete_owned_story(state.db.as_ref(), &user, story_id).await?;
    Ok(Json(MessageResponse::new("Masal silindi")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 20)]
    #[case(Some(0), 1)]
    #[case(Some(-5), 1)]
    #[case(Some(50), 50)]
    #[case(Some(1000), 100)]
    fn limits_are_clamped(#[case] requested: Option<i64>, #[case] expected: usize) {
        assert_eq!(clamp_limit(requested, DEFAULT_LIST_LIMIT), expected);
    }
}
