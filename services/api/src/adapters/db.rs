//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use masal_core::domain::{
    AdminUserUpdate, AuthSession, CreditRequest, CreditRequestStatus, DashboardStats, NewUser,
    ProfileUpdate, Role, Story, StoryQuery, StorySort, User,
};
use masal_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

const USER_COLUMNS: &str = "user_id, name, surname, email, phone, password_hash, auth_provider, \
     provider_name, picture, credits, role, is_verified, favorites, last_credit_reset, created_at";

const STORY_COLUMNS: &str = "id, slug, title, content, topic_id, topic_name, subtopic_id, \
     subtopic_name, kazanim, theme, age_group, main_character, audio_base64, duration, \
     play_count, created_at, user_id";

const CREDIT_REQUEST_COLUMNS: &str = "id, user_id, user_name, user_email, user_phone, \
     requested_credits, message, status, created_at";

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Escapes `LIKE` wildcards so user search text matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    name: String,
    surname: String,
    email: String,
    phone: Option<String>,
    password_hash: Option<String>,
    auth_provider: Option<String>,
    provider_name: Option<String>,
    picture: Option<String>,
    credits: i64,
    role: String,
    is_verified: bool,
    favorites: Vec<Uuid>,
    last_credit_reset: Option<String>,
    created_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.user_id,
            name: self.name,
            surname: self.surname,
            email: self.email,
            phone: self.phone,
            password_hash: self.password_hash,
            auth_provider: self.auth_provider,
            provider_name: self.provider_name,
            picture: self.picture,
            credits: self.credits,
            // Unknown roles never grant admin rights.
            role: self.role.parse().unwrap_or(Role::User),
            is_verified: self.is_verified,
            favorites: self.favorites,
            last_credit_reset: self.last_credit_reset,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct AuthSessionRecord {
    token: String,
    user_id: Uuid,
    expires_at: NaiveDateTime,
    created_at: DateTime<Utc>,
}
impl AuthSessionRecord {
    fn to_domain(self) -> AuthSession {
        AuthSession {
            token: self.token,
            user_id: self.user_id,
            expires_at: self.expires_at.and_utc(),
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct StoryRecord {
    id: Uuid,
    slug: Option<String>,
    title: String,
    content: String,
    topic_id: String,
    topic_name: String,
    subtopic_id: Option<String>,
    subtopic_name: Option<String>,
    kazanim: Option<String>,
    theme: String,
    age_group: String,
    main_character: Option<String>,
    audio_base64: Option<String>,
    duration: Option<i32>,
    play_count: i64,
    created_at: DateTime<Utc>,
    user_id: Option<Uuid>,
}
impl StoryRecord {
    fn to_domain(self) -> Story {
        Story {
            id: self.id,
            slug: self.slug,
            title: self.title,
            content: self.content,
            topic_id: self.topic_id,
            topic_name: self.topic_name,
            subtopic_id: self.subtopic_id,
            subtopic_name: self.subtopic_name,
            kazanim: self.kazanim,
            theme: self.theme,
            age_group: self.age_group,
            character: self.main_character,
            audio_base64: self.audio_base64,
            duration: self.duration,
            play_count: self.play_count,
            created_at: self.created_at,
            user_id: self.user_id,
        }
    }
}

#[derive(FromRow)]
struct CreditRequestRecord {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_email: String,
    user_phone: Option<String>,
    requested_credits: i64,
    message: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}
impl CreditRequestRecord {
    fn to_domain(self) -> PortResult<CreditRequest> {
        let status = self
            .status
            .parse::<CreditRequestStatus>()
            .map_err(PortError::Unexpected)?;
        Ok(CreditRequest {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            user_phone: self.user_phone,
            requested_credits: self.requested_credits,
            message: self.message,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct StatsRecord {
    total_users: i64,
    total_stories: i64,
    total_plays: i64,
    pending_credit_requests: i64,
    stories_today: i64,
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

impl DbAdapter {
    async fn fetch_user(&self, user_id: Uuid) -> PortResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(UserRecord::to_domain))
    }

    async fn fetch_story_by_id(&self, story_id: Uuid) -> PortResult<Story> {
        self.get_story(story_id)
            .await?
            .ok_or_else(|| PortError::NotFound(format!("Story {} not found", story_id)))
    }
}

fn user_not_found(user_id: Uuid) -> PortError {
    PortError::NotFound(format!("User {} not found", user_id))
}

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn ping(&self) -> PortResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> PortResult<User> {
        let email = user.email.to_lowercase();
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (user_id, name, surname, email, phone, password_hash, auth_provider, \
             provider_name, picture, credits, role, is_verified, last_credit_reset) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user.name)
        .bind(user.surname)
        .bind(&email)
        .bind(user.phone)
        .bind(user.password_hash)
        .bind(user.auth_provider)
        .bind(user.provider_name)
        .bind(user.picture)
        .bind(user.credits)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(user.last_credit_reset)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortError::Conflict(format!("Email {} already registered", email))
            } else {
                unexpected(e)
            }
        })?;
        Ok(record.to_domain())
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        self.fetch_user(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn find_user_by_email(&self, email: &str) -> PortResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(UserRecord::to_domain))
    }

    async fn get_users_by_ids(&self, user_ids: &[Uuid]) -> PortResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ANY($1)"
        ))
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(UserRecord::to_domain).collect())
    }

    async fn list_users(&self) -> PortResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(UserRecord::to_domain).collect())
    }

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET name = COALESCE($2, name), surname = COALESCE($3, surname), \
             phone = COALESCE($4, phone), picture = COALESCE($5, picture) \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(update.name)
        .bind(update.surname)
        .bind(update.phone)
        .bind(update.picture)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        record
            .map(UserRecord::to_domain)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn admin_update_user(
        &self,
        user_id: Uuid,
        update: AdminUserUpdate,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET credits = COALESCE($2, credits), role = COALESCE($3, role), \
             is_verified = COALESCE($4, is_verified) \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(update.credits)
        .bind(update.role.map(|r| r.as_str()))
        .bind(update.is_verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        record
            .map(UserRecord::to_domain)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn update_oauth_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        provider_name: &str,
        picture: Option<String>,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET name = COALESCE($2, name), provider_name = $3, picture = $4 \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(name)
        .bind(provider_name)
        .bind(picture)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        record
            .map(UserRecord::to_domain)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn delete_user(&self, user_id: Uuid) -> PortResult<()> {
        // Sessions and credit requests cascade; stories keep their owner id.
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn reset_monthly_credits(
        &self,
        user_id: Uuid,
        credits: i64,
        month: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET credits = $2, last_credit_reset = $3 \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(credits)
        .bind(month)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        record
            .map(UserRecord::to_domain)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn add_credits(&self, user_id: Uuid, delta: i64) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET credits = credits + $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        record
            .map(UserRecord::to_domain)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn add_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE users SET favorites = CASE WHEN $2 = ANY(favorites) THEN favorites \
             ELSE array_append(favorites, $2) END WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(story_id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()> {
        let result =
            sqlx::query("UPDATE users SET favorites = array_remove(favorites, $2) WHERE user_id = $1")
                .bind(user_id)
                .bind(story_id)
                .execute(&self.pool)
                .await
                .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn create_auth_session(&self, session: AuthSession) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO auth_sessions (token, user_id, expires_at, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.expires_at.naive_utc())
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortError::Conflict("Session token collision".to_string())
            } else {
                unexpected(e)
            }
        })?;
        Ok(())
    }

    async fn get_auth_session(&self, token: &str) -> PortResult<Option<AuthSession>> {
        let record = sqlx::query_as::<_, AuthSessionRecord>(
            "SELECT token, user_id, expires_at, created_at FROM auth_sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(AuthSessionRecord::to_domain))
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn insert_story(&self, story: &Story, charge_user: Option<Uuid>) -> PortResult<bool> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let charged = match charge_user {
            Some(user_id) => {
                let result = sqlx::query(
                    "UPDATE users SET credits = credits - 1 WHERE user_id = $1 AND credits > 0",
                )
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(unexpected)?;
                result.rows_affected() == 1
            }
            None => false,
        };

        sqlx::query(&format!(
            "INSERT INTO stories ({STORY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"
        ))
        .bind(story.id)
        .bind(&story.slug)
        .bind(&story.title)
        .bind(&story.content)
        .bind(&story.topic_id)
        .bind(&story.topic_name)
        .bind(&story.subtopic_id)
        .bind(&story.subtopic_name)
        .bind(&story.kazanim)
        .bind(&story.theme)
        .bind(&story.age_group)
        .bind(&story.character)
        .bind(&story.audio_base64)
        .bind(story.duration)
        .bind(story.play_count)
        .bind(story.created_at)
        .bind(story.user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortError::Conflict(format!("Slug {:?} already used", story.slug))
            } else {
                unexpected(e)
            }
        })?;

        tx.commit().await.map_err(unexpected)?;
        Ok(charged)
    }

    async fn get_story(&self, story_id: Uuid) -> PortResult<Option<Story>> {
        let record = sqlx::query_as::<_, StoryRecord>(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id = $1"
        ))
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(StoryRecord::to_domain))
    }

    async fn get_story_by_slug(&self, slug: &str) -> PortResult<Option<Story>> {
        let record = sqlx::query_as::<_, StoryRecord>(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(StoryRecord::to_domain))
    }

    async fn get_stories_by_ids(&self, story_ids: &[Uuid]) -> PortResult<Vec<Story>> {
        if story_ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = sqlx::query_as::<_, StoryRecord>(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(story_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(StoryRecord::to_domain).collect())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM stories WHERE slug = $1 AND ($2::UUID IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(exists)
    }

    async fn list_stories(&self, query: &StoryQuery) -> PortResult<Vec<Story>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {STORY_COLUMNS} FROM stories WHERE TRUE"));

        if let Some(topic_id) = &query.topic_id {
            builder.push(" AND topic_id = ").push_bind(topic_id.clone());
        }
        if let Some(subtopic_id) = &query.subtopic_id {
            builder.push(" AND subtopic_id = ").push_bind(subtopic_id.clone());
        }
        if let Some(user_id) = query.user_id {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(search) = &query.search {
            let pattern = like_pattern(search);
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR content ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR theme ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR kazanim ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder.push(match query.sort {
            StorySort::Newest => " ORDER BY created_at DESC",
            StorySort::Oldest => " ORDER BY created_at ASC",
            StorySort::Popular => " ORDER BY play_count DESC, created_at DESC",
        });
        if query.limit > 0 {
            builder.push(" LIMIT ").push_bind(query.limit as i64);
        }

        let records = builder
            .build_query_as::<StoryRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(StoryRecord::to_domain).collect())
    }

    async fn stories_without_slug(&self) -> PortResult<Vec<Story>> {
        let records = sqlx::query_as::<_, StoryRecord>(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE slug IS NULL OR slug = '' \
             ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(StoryRecord::to_domain).collect())
    }

    async fn set_story_slug(&self, story_id: Uuid, slug: &str) -> PortResult<()> {
        let result = sqlx::query("UPDATE stories SET slug = $2 WHERE id = $1")
            .bind(story_id)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PortError::Conflict(format!("Slug {} already used", slug))
                } else {
                    unexpected(e)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Story {} not found", story_id)));
        }
        Ok(())
    }

    async fn update_story_title(
        &self,
        story_id: Uuid,
        title: &str,
        slug: &str,
    ) -> PortResult<Story> {
        sqlx::query("UPDATE stories SET title = $2, slug = $3 WHERE id = $1")
            .bind(story_id)
            .bind(title)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PortError::Conflict(format!("Slug {} already used", slug))
                } else {
                    unexpected(e)
                }
            })?;
        self.fetch_story_by_id(story_id).await
    }

    async fn increment_play_count(&self, story_id: Uuid) -> PortResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE stories SET play_count = play_count + 1 WHERE id = $1 RETURNING play_count",
        )
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        count.ok_or_else(|| PortError::NotFound(format!("Story {} not found", story_id)))
    }

    async fn delete_story(&self, story_id: Uuid) -> PortResult<()> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(story_id)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Story {} not found", story_id)));
        }
        sqlx::query(
            "UPDATE users SET favorites = array_remove(favorites, $1) WHERE $1 = ANY(favorites)",
        )
        .bind(story_id)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }

    async fn create_credit_request(&self, request: &CreditRequest) -> PortResult<()> {
        sqlx::query(&format!(
            "INSERT INTO credit_requests ({CREDIT_REQUEST_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(request.id)
        .bind(request.user_id)
        .bind(&request.user_name)
        .bind(&request.user_email)
        .bind(&request.user_phone)
        .bind(request.requested_credits)
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn list_credit_requests(&self, user_id: Option<Uuid>) -> PortResult<Vec<CreditRequest>> {
        let records = sqlx::query_as::<_, CreditRequestRecord>(&format!(
            "SELECT {CREDIT_REQUEST_COLUMNS} FROM credit_requests \
             WHERE ($1::UUID IS NULL OR user_id = $1) ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        records.into_iter().map(CreditRequestRecord::to_domain).collect()
    }

    async fn decide_credit_request(
        &self,
        request_id: Uuid,
        status: CreditRequestStatus,
        grant: Option<i64>,
    ) -> PortResult<CreditRequest> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let record = sqlx::query_as::<_, CreditRequestRecord>(&format!(
            "UPDATE credit_requests SET status = $2 WHERE id = $1 AND status = 'pending' \
             RETURNING {CREDIT_REQUEST_COLUMNS}"
        ))
        .bind(request_id)
        .bind(status.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        let Some(record) = record else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM credit_requests WHERE id = $1)")
                    .bind(request_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(unexpected)?;
            return Err(if exists {
                PortError::Conflict(format!("Credit request {} already decided", request_id))
            } else {
                PortError::NotFound(format!("Credit request {} not found", request_id))
            });
        };
        let request = record.to_domain()?;

        if status == CreditRequestStatus::Approved {
            let result = sqlx::query("UPDATE users SET credits = credits + $2 WHERE user_id = $1")
                .bind(request.user_id)
                .bind(grant.unwrap_or(request.requested_credits))
                .execute(&mut *tx)
                .await
                .map_err(unexpected)?;
            if result.rows_affected() == 0 {
                return Err(user_not_found(request.user_id));
            }
        }

        tx.commit().await.map_err(unexpected)?;
        Ok(request)
    }

    async fn dashboard_stats(&self, day_start: DateTime<Utc>) -> PortResult<DashboardStats> {
        let record = sqlx::query_as::<_, StatsRecord>(
            "SELECT \
               (SELECT COUNT(*) FROM users) AS total_users, \
               (SELECT COUNT(*) FROM stories) AS total_stories, \
               (SELECT COALESCE(SUM(play_count), 0)::BIGINT FROM stories) AS total_plays, \
               (SELECT COUNT(*) FROM credit_requests WHERE status = 'pending') AS pending_credit_requests, \
               (SELECT COUNT(*) FROM stories WHERE created_at >= $1) AS stories_today",
        )
        .bind(day_start)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(DashboardStats {
            total_users: record.total_users,
            total_stories: record.total_stories,
            total_plays: record.total_plays,
            pending_credit_requests: record.pending_credit_requests,
            stories_today: record.stories_today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("orman"), "%orman%");
    }
}
