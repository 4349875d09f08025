//! crates/masal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Credits granted on registration and restored at every month boundary.
pub const DEFAULT_CREDITS: i64 = 10;

/// The `YYYY-MM` tag used to detect a new credit month.
pub fn credit_month_tag(now: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account. `password_hash` is only present for local accounts;
/// OAuth accounts carry `auth_provider` instead.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub auth_provider: Option<String>,
    /// The display name the OAuth provider reported at the last login.
    pub provider_name: Option<String>,
    pub picture: Option<String>,
    pub credits: i64,
    pub role: Role,
    pub is_verified: bool,
    pub favorites: Vec<Uuid>,
    pub last_credit_reset: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

/// Everything needed to insert a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub auth_provider: Option<String>,
    pub provider_name: Option<String>,
    pub picture: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub credits: i64,
    pub last_credit_reset: Option<String>,
}

/// Self-service profile edits; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
}

/// Admin-only account edits.
#[derive(Debug, Clone, Default)]
pub struct AdminUserUpdate {
    pub credits: Option<i64>,
    pub role: Option<Role>,
    pub is_verified: Option<bool>,
}

/// A browser login session (auth cookie / bearer token).
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A generated story as persisted.
#[derive(Debug, Clone)]
pub struct Story {
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
    pub audio_base64: Option<String>,
    /// Estimated spoken length in seconds.
    pub duration: Option<i32>,
    pub play_count: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorySort {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl FromStr for StorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(StorySort::Newest),
            "oldest" => Ok(StorySort::Oldest),
            "popular" | "popularity" => Ok(StorySort::Popular),
            other => Err(format!("unknown sort '{other}'")),
        }
    }
}

/// Filter/sort/limit query over persisted stories.
#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    pub topic_id: Option<String>,
    pub subtopic_id: Option<String>,
    /// Case-insensitive substring over title, content, theme and kazanım.
    pub search: Option<String>,
    pub user_id: Option<Uuid>,
    pub sort: StorySort,
    pub limit: usize,
}

impl StoryQuery {
    /// Whether a story satisfies the filter part of this query.
    pub fn matches(&self, story: &Story) -> bool {
        if let Some(topic_id) = &self.topic_id {
            if &story.topic_id != topic_id {
                return false;
            }
        }
        if let Some(subtopic_id) = &self.subtopic_id {
            if story.subtopic_id.as_ref() != Some(subtopic_id) {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if story.user_id != Some(user_id) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystacks = [
                Some(story.title.as_str()),
                Some(story.content.as_str()),
                Some(story.theme.as_str()),
                story.kazanim.as_deref(),
            ];
            if !haystacks
                .into_iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl CreditRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRequestStatus::Pending => "pending",
            CreditRequestStatus::Approved => "approved",
            CreditRequestStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for CreditRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CreditRequestStatus::Pending),
            "approved" => Ok(CreditRequestStatus::Approved),
            "rejected" => Ok(CreditRequestStatus::Rejected),
            other => Err(format!("unknown credit request status '{other}'")),
        }
    }
}

/// A user's request for more credits, with the requester's contact details
/// copied in at creation time.
#[derive(Debug, Clone)]
pub struct CreditRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub requested_credits: i64,
    pub message: Option<String>,
    pub status: CreditRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_stories: i64,
    pub total_plays: i64,
    pub pending_credit_requests: i64,
    pub stories_today: i64,
}

/// Profile returned by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Outcome of the remote moderation service.
#[derive(Debug, Clone, Default)]
pub struct ModerationVerdict {
    pub flagged: bool,
    /// Flagged categories, e.g. `sexual`, `hate`, `violence`.
    pub categories: Vec<String>,
}
