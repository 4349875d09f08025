//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the `DatabaseService` port. Used when no
//! `DATABASE_URL` is configured and by the test suite. Every operation takes
//! the single lock once, so each call is atomic like a single-row update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use masal_core::domain::{
    AdminUserUpdate, AuthSession, CreditRequest, CreditRequestStatus, DashboardStats, NewUser,
    ProfileUpdate, Story, StoryQuery, StorySort, User,
};
use masal_core::ports::{DatabaseService, PortError, PortResult};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    sessions: HashMap<String, AuthSession>,
    stories: HashMap<Uuid, Story>,
    credit_requests: HashMap<Uuid, CreditRequest>,
}

#[derive(Default)]
pub struct MemoryDb {
    tables: RwLock<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_not_found(user_id: Uuid) -> PortError {
    PortError::NotFound(format!("User {} not found", user_id))
}

fn story_not_found(story_id: Uuid) -> PortError {
    PortError::NotFound(format!("Story {} not found", story_id))
}

/// Sorts and truncates stories the same way the SQL adapter orders them.
pub(crate) fn sort_and_limit(mut stories: Vec<Story>, sort: StorySort, limit: usize) -> Vec<Story> {
    match sort {
        StorySort::Newest => stories.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        StorySort::Oldest => stories.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        StorySort::Popular => stories.sort_by(|a, b| {
            b.play_count
                .cmp(&a.play_count)
                .then(b.created_at.cmp(&a.created_at))
        }),
    }
    if limit > 0 {
        stories.truncate(limit);
    }
    stories
}

#[async_trait]
impl DatabaseService for MemoryDb {
    async fn ping(&self) -> PortResult<()> {
        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let email = user.email.to_lowercase();
        if tables.users.values().any(|u| u.email == email) {
            return Err(PortError::Conflict(format!("Email {} already registered", email)));
        }
        let record = User {
            user_id: Uuid::new_v4(),
            name: user.name,
            surname: user.surname,
            email,
            phone: user.phone,
            password_hash: user.password_hash,
            auth_provider: user.auth_provider,
            provider_name: user.provider_name,
            picture: user.picture,
            credits: user.credits,
            role: user.role,
            is_verified: user.is_verified,
            favorites: Vec::new(),
            last_credit_reset: user.last_credit_reset,
            created_at: Utc::now(),
        };
        tables.users.insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        self.tables
            .read()
            .await
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn find_user_by_email(&self, email: &str) -> PortResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_users_by_ids(&self, user_ids: &[Uuid]) -> PortResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn list_users(&self) -> PortResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(surname) = update.surname {
            user.surname = surname;
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(picture) = update.picture {
            user.picture = Some(picture);
        }
        Ok(user.clone())
    }

    async fn admin_update_user(
        &self,
        user_id: Uuid,
        update: AdminUserUpdate,
    ) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        if let Some(credits) = update.credits {
            user.credits = credits;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(is_verified) = update.is_verified {
            user.is_verified = is_verified;
        }
        Ok(user.clone())
    }

    async fn update_oauth_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        provider_name: &str,
        picture: Option<String>,
    ) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        if let Some(name) = name {
            user.name = name;
        }
        user.provider_name = Some(provider_name.to_string());
        user.picture = picture;
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: Uuid) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        tables.sessions.retain(|_, s| s.user_id != user_id);
        tables.credit_requests.retain(|_, r| r.user_id != user_id);
        Ok(())
    }

    async fn reset_monthly_credits(
        &self,
        user_id: Uuid,
        credits: i64,
        month: &str,
    ) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        user.credits = credits;
        user.last_credit_reset = Some(month.to_string());
        Ok(user.clone())
    }

    async fn add_credits(&self, user_id: Uuid, delta: i64) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        user.credits += delta;
        Ok(user.clone())
    }

    async fn add_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        if !user.favorites.contains(&story_id) {
            user.favorites.push(story_id);
        }
        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, story_id: Uuid) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        user.favorites.retain(|id| *id != story_id);
        Ok(())
    }

    async fn create_auth_session(&self, session: AuthSession) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        if tables.sessions.contains_key(&session.token) {
            return Err(PortError::Conflict("Session token collision".to_string()));
        }
        tables.sessions.insert(session.token.clone(), session);
        Ok(())
    }

    async fn get_auth_session(&self, token: &str) -> PortResult<Option<AuthSession>> {
        Ok(self.tables.read().await.sessions.get(token).cloned())
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        self.tables.write().await.sessions.remove(token);
        Ok(())
    }

    async fn insert_story(&self, story: &Story, charge_user: Option<Uuid>) -> PortResult<bool> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = &story.slug {
            if tables.stories.values().any(|s| s.slug.as_ref() == Some(slug)) {
                return Err(PortError::Conflict(format!("Slug {} already used", slug)));
            }
        }
        let mut charged = false;
        if let Some(user_id) = charge_user {
            let user = tables
                .users
                .get_mut(&user_id)
                .ok_or_else(|| user_not_found(user_id))?;
            if user.credits > 0 {
                user.credits -= 1;
                charged = true;
            }
        }
        tables.stories.insert(story.id, story.clone());
        Ok(charged)
    }

    async fn get_story(&self, story_id: Uuid) -> PortResult<Option<Story>> {
        Ok(self.tables.read().await.stories.get(&story_id).cloned())
    }

    async fn get_story_by_slug(&self, slug: &str) -> PortResult<Option<Story>> {
        Ok(self
            .tables
            .read()
            .await
            .stories
            .values()
            .find(|s| s.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn get_stories_by_ids(&self, story_ids: &[Uuid]) -> PortResult<Vec<Story>> {
        let tables = self.tables.read().await;
        Ok(story_ids
            .iter()
            .filter_map(|id| tables.stories.get(id).cloned())
            .collect())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .stories
            .values()
            .any(|s| s.slug.as_deref() == Some(slug) && Some(s.id) != exclude))
    }

    async fn list_stories(&self, query: &StoryQuery) -> PortResult<Vec<Story>> {
        let matching: Vec<Story> = self
            .tables
            .read()
            .await
            .stories
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();
        Ok(sort_and_limit(matching, query.sort, query.limit))
    }

    async fn stories_without_slug(&self) -> PortResult<Vec<Story>> {
        let stories: Vec<Story> = self
            .tables
            .read()
            .await
            .stories
            .values()
            .filter(|s| s.slug.as_deref().map_or(true, str::is_empty))
            .cloned()
            .collect();
        Ok(sort_and_limit(stories, StorySort::Oldest, 0))
    }

    async fn set_story_slug(&self, story_id: Uuid, slug: &str) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        let story = tables
            .stories
            .get_mut(&story_id)
            .ok_or_else(|| story_not_found(story_id))?;
        story.slug = Some(slug.to_string());
        Ok(())
    }

    async fn update_story_title(
        &self,
        story_id: Uuid,
        title: &str,
        slug: &str,
    ) -> PortResult<Story> {
        let mut tables = self.tables.write().await;
        let story = tables
            .stories
            .get_mut(&story_id)
            .ok_or_else(|| story_not_found(story_id))?;
        story.title = title.to_string();
        story.slug = Some(slug.to_string());
        Ok(story.clone())
    }

    async fn increment_play_count(&self, story_id: Uuid) -> PortResult<i64> {
        let mut tables = self.tables.write().await;
        let story = tables
            .stories
            .get_mut(&story_id)
            .ok_or_else(|| story_not_found(story_id))?;
        story.play_count += 1;
        Ok(story.play_count)
    }

    async fn delete_story(&self, story_id: Uuid) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .stories
            .remove(&story_id)
            .ok_or_else(|| story_not_found(story_id))?;
        for user in tables.users.values_mut() {
            user.favorites.retain(|id| *id != story_id);
        }
        Ok(())
    }

    async fn create_credit_request(&self, request: &CreditRequest) -> PortResult<()> {
        self.tables
            .write()
            .await
            .credit_requests
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn list_credit_requests(&self, user_id: Option<Uuid>) -> PortResult<Vec<CreditRequest>> {
        let mut requests: Vec<CreditRequest> = self
            .tables
            .read()
            .await
            .credit_requests
            .values()
            .filter(|r| user_id.map_or(true, |id| r.user_id == id))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn decide_credit_request(
        &self,
        request_id: Uuid,
        status: CreditRequestStatus,
        grant: Option<i64>,
    ) -> PortResult<CreditRequest> {
        let mut tables = self.tables.write().await;
        let request = tables
            .credit_requests
            .get(&request_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Credit request {} not found", request_id)))?;
        if request.status != CreditRequestStatus::Pending {
            return Err(PortError::Conflict(format!(
                "Credit request {} already decided",
                request_id
            )));
        }

        if status == CreditRequestStatus::Approved {
            let user = tables
                .users
                .get_mut(&request.user_id)
                .ok_or_else(|| user_not_found(request.user_id))?;
            user.credits += grant.unwrap_or(request.requested_credits);
        }

        let stored = tables
            .credit_requests
            .get_mut(&request_id)
            .ok_or_else(|| PortError::NotFound(format!("Credit request {} not found", request_id)))?;
        stored.status = status;
        Ok(stored.clone())
    }

    async fn dashboard_stats(&self, day_start: DateTime<Utc>) -> PortResult<DashboardStats> {
        let tables = self.tables.read().await;
        Ok(DashboardStats {
            total_users: tables.users.len() as i64,
            total_stories: tables.stories.len() as i64,
            total_plays: tables.stories.values().map(|s| s.play_count).sum(),
            pending_credit_requests: tables
                .credit_requests
                .values()
                .filter(|r| r.status == CreditRequestStatus::Pending)
                .count() as i64,
            stories_today: tables
                .stories
                .values()
                .filter(|s| s.created_at >= day_start)
                .count() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use masal_core::domain::Role;

    fn story(title: &str, plays: i64, age_minutes: i64) -> Story {
        Story {
            id: Uuid::new_v4(),
            slug: Some(title.to_lowercase()),
            title: title.to_string(),
            content: String::new(),
            topic_id: "vucudumuz".to_string(),
            topic_name: "Vücudumuz".to_string(),
            subtopic_id: None,
            subtopic_name: None,
            kazanim: None,
            theme: "dostluk".to_string(),
            age_group: "4-6".to_string(),
            character: None,
            audio_base64: None,
            duration: None,
            play_count: plays,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            user_id: None,
        }
    }

    fn titles(stories: &[Story]) -> Vec<&str> {
        stories.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn sorting_matches_sql_order() {
        let stories = vec![story("A", 1, 30), story("B", 5, 20), story("C", 5, 10)];

        let newest = sort_and_limit(stories.clone(), StorySort::Newest, 0);
        assert_eq!(titles(&newest), ["C", "B", "A"]);

        let oldest = sort_and_limit(stories.clone(), StorySort::Oldest, 2);
        assert_eq!(titles(&oldest), ["A", "B"]);

        // Ties on plays go to the newer story.
        let popular = sort_and_limit(stories, StorySort::Popular, 0);
        assert_eq!(titles(&popular), ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn charging_never_goes_below_zero() {
        let db = MemoryDb::new();
        let user = db
            .create_user(NewUser {
                name: "Deniz".to_string(),
                surname: String::new(),
                email: "deniz@example.com".to_string(),
                phone: None,
                password_hash: None,
                auth_provider: None,
                provider_name: None,
                picture: None,
                role: Role::User,
                is_verified: false,
                credits: 1,
                last_credit_reset: None,
            })
            .await
            .unwrap();

        assert!(db.insert_story(&story("A", 0, 0), Some(user.user_id)).await.unwrap());
        assert!(!db.insert_story(&story("B", 0, 0), Some(user.user_id)).await.unwrap());
        assert_eq!(db.get_user(user.user_id).await.unwrap().credits, 0);

        let duplicate = db.insert_story(&story("A", 0, 0), None).await;
        assert!(matches!(duplicate, Err(PortError::Conflict(_))));
    }
}
