//! services/api/src/web/models.rs
//!
//! Public projections of the domain entities. Every response goes through one
//! of these so internal fields (password hashes, provider bookkeeping) never
//! reach a client.

use chrono::{DateTime, Utc};
use masal_core::catalog::{Subtopic, SubtopicEntry, Topic};
use masal_core::domain::{CreditRequest, DashboardStats, Story, User};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Users
//=========================================================================================

/// The signed-in user's own view of their account.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub auth_provider: Option<String>,
    pub credits: i64,
    pub role: String,
    pub is_verified: bool,
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            picture: user.picture.clone(),
            auth_provider: user.auth_provider.clone(),
            credits: user.credits,
            role: user.role.as_str().to_string(),
            is_verified: user.is_verified,
            favorites: user.favorites.clone(),
            created_at: user.created_at,
        }
    }
}

/// What anyone may see about a story author.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct PublicUserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            picture: user.picture.clone(),
            created_at: user.created_at,
        }
    }
}

//=========================================================================================
// Stories
//=========================================================================================

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct StoryResponse {
    pub id: Uuid,
    pub slug: Option<String>,
    pub title: String,
    pub content: String,
    pub topic_id: String,
    pub topic_name: String,
    pub subtopic_id: Option<String>,
    pub subtopic_name: Option<String>,
    pub kazanim: Option<String>,
    pub theme: String,
    pub age_group: String,
    pub character: Option<String>,
    /// Base64-encoded mp3.
    pub audio_base64: Option<String>,
    /// Estimated spoken length in seconds.
    pub duration: Option<i32>,
    pub play_count: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    pub creator_name: Option<String>,
    pub creator_picture: Option<String>,
    /// Set when the story was saved without audio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_warning: Option<String>,
}

impl StoryResponse {
    pub fn new(story: Story, creator: Option<&User>) -> Self {
        Self {
            id: story.id,
            slug: story.slug,
            title: story.title,
            content: story.content,
            topic_id: story.topic_id,
            topic_name: story.topic_name,
            subtopic_id: story.subtopic_id,
            subtopic_name: story.subtopic_name,
            kazanim: story.kazanim,
            theme: story.theme,
            age_group: story.age_group,
            character: story.character,
            audio_base64: story.audio_base64,
            duration: story.duration,
            play_count: story.play_count,
            created_at: story.created_at,
            user_id: story.user_id,
            creator_name: creator.map(User::full_name),
            creator_picture: creator.and_then(|u| u.picture.clone()),
            audio_warning: None,
        }
    }
}

//=========================================================================================
// Topics
//=========================================================================================

#[derive(Serialize, ToSchema, Debug)]
pub struct TopicSummary {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub image: String,
    pub subtopic_count: usize,
}

impl From<&Topic> for TopicSummary {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.to_string(),
            name: topic.name.to_string(),
            icon: topic.icon.to_string(),
            color: topic.color.to_string(),
            description: topic.description.to_string(),
            image: topic.image.to_string(),
            subtopic_count: topic.subtopic_count(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SubtopicView {
    pub id: String,
    pub name: String,
    pub kazanim: String,
}

impl From<&Subtopic> for SubtopicView {
    fn from(subtopic: &Subtopic) -> Self {
        Self {
            id: subtopic.id.to_string(),
            name: subtopic.name.to_string(),
            kazanim: subtopic.kazanim.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct TopicDetail {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub image: String,
    pub subtopics: Vec<SubtopicView>,
}

impl From<&Topic> for TopicDetail {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.to_string(),
            name: topic.name.to_string(),
            icon: topic.icon.to_string(),
            color: topic.color.to_string(),
            description: topic.description.to_string(),
            image: topic.image.to_string(),
            subtopics: topic.subtopics.iter().map(SubtopicView::from).collect(),
        }
    }
}

/// A subtopic flattened together with its parent topic.
#[derive(Serialize, ToSchema, Debug)]
pub struct SubtopicEntryView {
    pub topic_id: String,
    pub topic_name: String,
    pub subtopic_id: String,
    pub subtopic_name: String,
    pub kazanim: String,
}

impl From<SubtopicEntry> for SubtopicEntryView {
    fn from(entry: SubtopicEntry) -> Self {
        Self {
            topic_id: entry.topic.id.to_string(),
            topic_name: entry.topic.name.to_string(),
            subtopic_id: entry.subtopic.id.to_string(),
            subtopic_name: entry.subtopic.name.to_string(),
            kazanim: entry.subtopic.kazanim.to_string(),
        }
    }
}

//=========================================================================================
// Credits and Admin
//=========================================================================================

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct CreditRequestResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub requested_credits: i64,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<CreditRequest> for CreditRequestResponse {
    fn from(request: CreditRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            user_name: request.user_name,
            user_email: request.user_email,
            user_phone: request.user_phone,
            requested_credits: request.requested_credits,
            message: request.message,
            status: request.status.as_str().to_string(),
            created_at: request.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_stories: i64,
    pub total_plays: i64,
    pub pending_credit_requests: i64,
    pub stories_today: i64,
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_stories: stats.total_stories,
            total_plays: stats.total_plays,
            pending_credit_requests: stats.pending_credit_requests,
            stories_today: stats.stories_today,
        }
    }
}

/// A plain `{"message": ...}` acknowledgement.
#[derive(Serialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
