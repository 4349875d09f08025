//! services/api/src/web/topics.rs
//!
//! Read-only endpoints over the static topic catalog.

use axum::{
    extract::{Path, Query},
    Json,
};
use masal_core::catalog;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ApiError, ApiResult};
use crate::web::models::{SubtopicEntryView, SubtopicView, TopicDetail, TopicSummary};

#[derive(Deserialize, IntoParams)]
pub struct KazanimSearchQuery {
    /// Case-insensitive substring of a kazanım.
    pub q: String,
}

fn topic_not_found() -> ApiError {
    ApiError::not_found("Konu bulunamadı")
}

#[utoipa::path(
    get,
    path = "/api/topics",
    responses((status = 200, description = "All topics", body = [TopicSummary]))
)]
pub async fn list_topics_handler() -> Json<Vec<TopicSummary>> {
    Json(catalog::all_topics().iter().map(TopicSummary::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/topics/{topic_id}",
    params(("topic_id" = String, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Topic with its subtopics", body = TopicDetail),
        (status = 404, description = "Unknown topic")
    )
)]
pub async fn get_topic_handler(Path(topic_id): Path<String>) -> ApiResult<Json<TopicDetail>> {
    let topic = catalog::topic(&topic_id).ok_or_else(topic_not_found)?;
    Ok(Json(TopicDetail::from(topic)))
}

#[utoipa::path(
    get,
    path = "/api/topics/{topic_id}/subtopics",
    params(("topic_id" = String, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Subtopics of the topic", body = [SubtopicView]),
        (status = 404, description = "Unknown topic")
    )
)]
pub async fn list_subtopics_handler(
    Path(topic_id): Path<String>,
) -> ApiResult<Json<Vec<SubtopicView>>> {
    let subtopics = catalog::subtopics(&topic_id).ok_or_else(topic_not_found)?;
    Ok(Json(subtopics.iter().map(SubtopicView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/topics/{topic_id}/subtopics/{subtopic_id}",
    params(
        ("topic_id" = String, Path, description = "Topic id"),
        ("subtopic_id" = String, Path, description = "Subtopic id")
    ),
    responses(
        (status = 200, description = "One subtopic", body = SubtopicView),
        (status = 404, description = "Unknown topic or subtopic")
    )
)]
pub async fn get_subtopic_handler(
    Path((topic_id, subtopic_id)): Path<(String, String)>,
) -> ApiResult<Json<SubtopicView>> {
    let topic = catalog::topic(&topic_id).ok_or_else(topic_not_found)?;
    let subtopic = topic
        .subtopic(&subtopic_id)
        .ok_or_else(|| ApiError::not_found("Alt konu bulunamadı"))?;
    Ok(Json(SubtopicView::from(subtopic)))
}

#[utoipa::path(
    get,
    path = "/api/subtopics/all",
    responses((status = 200, description = "Every subtopic with its topic", body = [SubtopicEntryView]))
)]
pub async fn all_subtopics_handler() -> Json<Vec<SubtopicEntryView>> {
    Json(
        catalog::all_subtopics()
            .into_iter()
            .map(SubtopicEntryView::from)
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/api/kazanim/search",
    params(KazanimSearchQuery),
    responses((status = 200, description = "Matching subtopics", body = [SubtopicEntryView]))
)]
pub async fn search_kazanim_handler(
    Query(query): Query<KazanimSearchQuery>,
) -> Json<Vec<SubtopicEntryView>> {
    Json(
        catalog::search_kazanim(&query.q)
            .into_iter()
            .map(SubtopicEntryView::from)
            .collect(),
    )
}
