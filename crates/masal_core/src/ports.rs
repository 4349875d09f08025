//! crates/masal_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AdminUserUpdate, AuthSession, CreditRequest, CreditRequestStatus, DashboardStats,
    ModerationVerdict, NewUser, OAuthProfile, ProfileUpdate, Story, StoryQuery, User,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// The provider refused the call because the account ran out of quota.
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
    /// The provider is not configured (e.g. missing API key).
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> PortResult<()>;

    // --- Users ---
    /// Fails with `Conflict` when the email is already registered.
    async fn create_user(&self, user: NewUser) -> PortResult<User>;

    async fn get_user(&self, user_id: Uuid) -> PortResult<User>;

    async fn find_user_by_email(&self, email: &str) -> PortResult<Option<User>>;

    async fn get_users_by_ids(&self, user_ids: &[Uuid]) -> PortResult<Vec<User>>;

    async fn list_users(&self) -> PortResult<Vec<User>>;

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> PortResult<User>;

    async fn admin_update_user(&self, user_id: Uuid, update: AdminUserUpdate)
        -> PortResult<User>;

    /// Refreshes provider-sourced fields after an OAuth login. `name` is only
    /// written when `Some`.
    async fn update_oauth_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        provider_name: &str,
        picture: Option<String>,
    ) -> PortResult<User>;

    /// Removes the user together with their sessions.
    async fn delete_user(&self, user_id: Uuid) -> PortResult<()>;

    /// Sets the balance to `credits` and stamps the month tag.
    async fn reset_monthly_credits(&self, user_id: Uuid, credits: i64, month: &str)
        -> PortResult<User>;

    /// Atomically adds `delta` to the balance.
    async fn add_credits(&self, user_id: Uuid, delta: i64) -> PortResult<User>;

    /// Atomic set-insert; adding an existing favorite is a no-op.
    async fn add_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()>;

    async fn remove_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()>;

    // --- Auth sessions ---
    async fn create_auth_session(&self, session: AuthSession) -> PortResult<()>;

    /// Returns the row even when expired; callers decide on validity.
    async fn get_auth_session(&self, token: &str) -> PortResult<Option<AuthSession>>;

    async fn delete_auth_session(&self, token: &str) -> PortResult<()>;

    // --- Stories ---
    /// Persists the story and, when `charge_user` is set, decrements that
    /// user's credits by one if positive, as one unit of work. Returns whether
    /// a credit was actually taken.
    async fn insert_story(&self, story: &Story, charge_user: Option<Uuid>) -> PortResult<bool>;

    async fn get_story(&self, story_id: Uuid) -> PortResult<Option<Story>>;

    async fn get_story_by_slug(&self, slug: &str) -> PortResult<Option<Story>>;

    async fn get_stories_by_ids(&self, story_ids: &[Uuid]) -> PortResult<Vec<Story>>;

    /// Whether any story other than `exclude` already uses `slug`.
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool>;

    async fn list_stories(&self, query: &StoryQuery) -> PortResult<Vec<Story>>;

    async fn stories_without_slug(&self) -> PortResult<Vec<Story>>;

    async fn set_story_slug(&self, story_id: Uuid, slug: &str) -> PortResult<()>;

    async fn update_story_title(&self, story_id: Uuid, title: &str, slug: &str)
        -> PortResult<Story>;

    /// Atomically increments the play counter and returns the new value.
    async fn increment_play_count(&self, story_id: Uuid) -> PortResult<i64>;

    async fn delete_story(&self, story_id: Uuid) -> PortResult<()>;

    // --- Credit requests ---
    async fn create_credit_request(&self, request: &CreditRequest) -> PortResult<()>;

    /// All requests when `user_id` is `None`, newest first.
    async fn list_credit_requests(&self, user_id: Option<Uuid>) -> PortResult<Vec<CreditRequest>>;

    /// Moves a pending request to `status` and, on approval, adds `grant`
    /// (or the requested amount) to the requester, as one unit of work.
    /// A request that is no longer pending yields `Conflict` and changes nothing.
    async fn decide_credit_request(
        &self,
        request_id: Uuid,
        status: CreditRequestStatus,
        grant: Option<i64>,
    ) -> PortResult<CreditRequest>;

    // --- Admin ---
    async fn dashboard_stats(&self, day_start: DateTime<Utc>) -> PortResult<DashboardStats>;
}

#[async_trait]
pub trait StoryTextService: Send + Sync {
    /// Runs one completion with a fixed system instruction and a user prompt.
    async fn complete(&self, system: &str, prompt: &str) -> PortResult<String>;
}

#[async_trait]
pub trait TextToSpeechService: Send + Sync {
    /// Generates encoded audio (mp3) from a string of text.
    async fn synthesize(&self, text: &str) -> PortResult<Vec<u8>>;
}

#[async_trait]
pub trait ModerationService: Send + Sync {
    async fn moderate(&self, text: &str) -> PortResult<ModerationVerdict>;
}

#[async_trait]
pub trait OAuthService: Send + Sync {
    /// Exchanges an authorization code for the provider's user profile.
    async fn exchange_code(&self, code: &str) -> PortResult<OAuthProfile>;
}
