//! services/api/src/session.rs
//!
//! Accounts and login sessions: password hashing, opaque session tokens,
//! OAuth sign-in, the admin bootstrap and the lazy monthly credit reset.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use masal_core::domain::{
    credit_month_tag, AdminUserUpdate, AuthSession, NewUser, Role, User, DEFAULT_CREDITS,
};
use masal_core::ports::{DatabaseService, OAuthService, PortError};
use masal_core::{ServiceError, ServiceResult};
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";
pub const USER_SESSION_DAYS: i64 = 7;
pub const ADMIN_SESSION_DAYS: i64 = 1;
const TOKEN_LENGTH: usize = 48;
const MIN_PASSWORD_LENGTH: usize = 6;
const GOOGLE_PROVIDER: &str = "google";

//=========================================================================================
// Password Hashing
//=========================================================================================

/// Hashes a password into an argon2 PHC string (the salt is embedded).
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}

/// Malformed stored hashes verify as `false`.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Mints a random opaque session token.
pub fn mint_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

//=========================================================================================
// Cookie and Header Helpers
//=========================================================================================

/// Finds the session token: the cookie first, then `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
        .filter(|t| !t.is_empty());
    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value for a session. `SameSite=None` lets the frontend on
/// another origin send it back; browsers require `Secure` alongside it.
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    let same_site = if secure { "None" } else { "Lax" };
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; SameSite={}; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        secure_attr,
        same_site,
        max_age.num_seconds()
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::zero(), secure)
}

//=========================================================================================
// Session Manager
//=========================================================================================

/// Input for a local (email + password) registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// A freshly created session and the user it belongs to.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
    pub max_age: Duration,
}

#[derive(Clone)]
pub struct SessionManager {
    db: Arc<dyn DatabaseService>,
    oauth: Arc<dyn OAuthService>,
    admin_email: String,
    admin_password: String,
}

impl SessionManager {
    pub fn new(db: Arc<dyn DatabaseService>, oauth: Arc<dyn OAuthService>, config: &Config) -> Self {
        Self {
            db,
            oauth,
            admin_email: config.admin_email.to_lowercase(),
            admin_password: config.admin_password.clone(),
        }
    }

    /// Creates a local account with the default credit grant.
    pub async fn register(&self, registration: Registration) -> ServiceResult<User> {
        let email = registration.email.trim().to_lowercase();
        if registration.name.trim().is_empty() || !email.contains('@') {
            return Err(ServiceError::Validation(
                "Ad ve geçerli bir e-posta adresi zorunludur".to_string(),
            ));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::Validation(format!(
                "Şifre en az {MIN_PASSWORD_LENGTH} karakter olmalıdır"
            )));
        }
        if self.db.find_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::Validation(
                "Bu e-posta adresi zaten kayıtlı".to_string(),
            ));
        }

        let new_user = NewUser {
            name: registration.name.trim().to_string(),
            surname: registration.surname.trim().to_string(),
            email,
            phone: registration.phone.filter(|p| !p.trim().is_empty()),
            password_hash: Some(hash_password(&registration.password)?),
            auth_provider: None,
            provider_name: None,
            picture: None,
            role: Role::User,
            is_verified: false,
            credits: DEFAULT_CREDITS,
            last_credit_reset: Some(credit_month_tag(Utc::now())),
        };
        let user = self.db.create_user(new_user).await.map_err(|e| match e {
            // A concurrent registration won the unique index.
            PortError::Conflict(_) => {
                ServiceError::Validation("Bu e-posta adresi zaten kayıtlı".to_string())
            }
            other => other.into(),
        })?;
        info!("User registered: {}", user.user_id);
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<IssuedSession> {
        let invalid = || ServiceError::Auth("E-posta veya şifre hatalı".to_string());
        let user = self
            .db
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;
        let stored = user.password_hash.as_deref().ok_or_else(invalid)?;
        if !verify_password(password, stored) {
            return Err(invalid());
        }
        info!("User logged in: {}", user.user_id);
        self.issue(user, USER_SESSION_DAYS).await
    }

    /// Logs in with the configured admin credentials, creating the admin
    /// account on first use.
    pub async fn admin_login(&self, email: &str, password: &str) -> ServiceResult<IssuedSession> {
        if email.trim().to_lowercase() != self.admin_email || password != self.admin_password {
            return Err(ServiceError::Auth("Geçersiz yönetici bilgileri".to_string()));
        }

        let admin = match self.db.find_user_by_email(&self.admin_email).await? {
            Some(user) if user.is_admin() => user,
            Some(user) => {
                let update = AdminUserUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                };
                self.db.admin_update_user(user.user_id, update).await?
            }
            None => {
                let admin = self
                    .db
                    .create_user(NewUser {
                        name: "Admin".to_string(),
                        surname: String::new(),
                        email: self.admin_email.clone(),
                        phone: None,
                        password_hash: Some(hash_password(&self.admin_password)?),
                        auth_provider: None,
                        provider_name: None,
                        picture: None,
                        role: Role::Admin,
                        is_verified: true,
                        credits: DEFAULT_CREDITS,
                        last_credit_reset: Some(credit_month_tag(Utc::now())),
                    })
                    .await?;
                info!("Admin account provisioned: {}", admin.user_id);
                admin
            }
        };
        self.issue(admin, ADMIN_SESSION_DAYS).await
    }

    /// Exchanges an OAuth code and signs the matching local user in,
    /// creating the account on first login.
    pub async fn oauth_login(&self, code: &str) -> ServiceResult<IssuedSession> {
        if code.trim().is_empty() {
            return Err(ServiceError::Validation("Oturum kodu eksik".to_string()));
        }
        let profile = self.oauth.exchange_code(code).await.map_err(|e| match e {
            PortError::Unauthorized => {
                ServiceError::Auth("Google oturumu doğrulanamadı".to_string())
            }
            PortError::Unavailable(msg) => ServiceError::ProviderUnavailable(msg),
            other => ServiceError::Provider(format!("Google girişi başarısız: {other}")),
        })?;

        let user = match self.db.find_user_by_email(&profile.email).await? {
            Some(existing) => {
                let name = oauth_name_update(&existing, &profile.name);
                self.db
                    .update_oauth_profile(existing.user_id, name, &profile.name, profile.picture)
                    .await?
            }
            None => {
                let user = self
                    .db
                    .create_user(NewUser {
                        name: profile.name.trim().to_string(),
                        surname: String::new(),
                        email: profile.email.to_lowercase(),
                        phone: None,
                        password_hash: None,
                        auth_provider: Some(GOOGLE_PROVIDER.to_string()),
                        provider_name: Some(profile.name.clone()),
                        picture: profile.picture,
                        role: Role::User,
                        is_verified: true,
                        credits: DEFAULT_CREDITS,
                        last_credit_reset: Some(credit_month_tag(Utc::now())),
                    })
                    .await?;
                info!("User registered through Google: {}", user.user_id);
                user
            }
        };
        self.issue(user, USER_SESSION_DAYS).await
    }

    /// Resolves a token to its user. Expired sessions count as absent. Applies
    /// the monthly credit reset when the month tag changed.
    pub async fn resolve(&self, token: &str) -> ServiceResult<User> {
        self.resolve_at(token, Utc::now()).await
    }

    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<User> {
        let unauthenticated = || ServiceError::Auth("Oturum açmanız gerekiyor".to_string());
        let session = self
            .db
            .get_auth_session(token)
            .await?
            .ok_or_else(unauthenticated)?;
        if session.expires_at <= now {
            return Err(ServiceError::Auth(
                "Oturumunuzun süresi doldu, lütfen tekrar giriş yapın".to_string(),
            ));
        }

        let user = match self.db.get_user(session.user_id).await {
            Ok(user) => user,
            Err(PortError::NotFound(_)) => return Err(unauthenticated()),
            Err(e) => return Err(e.into()),
        };

        let month = credit_month_tag(now);
        if user.last_credit_reset.as_deref() == Some(month.as_str()) {
            return Ok(user);
        }
        let user = self
            .db
            .reset_monthly_credits(user.user_id, DEFAULT_CREDITS, &month)
            .await?;
        info!("Monthly credits reset for user {} ({month})", user.user_id);
        Ok(user)
    }

    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        self.db.delete_auth_session(token).await?;
        Ok(())
    }

    async fn issue(&self, user: User, days: i64) -> ServiceResult<IssuedSession> {
        let now = Utc::now();
        let max_age = Duration::days(days);
        let mut token = mint_token();
        let mut attempt = 0;
        loop {
            let session = AuthSession {
                token: token.clone(),
                user_id: user.user_id,
                expires_at: now + max_age,
                created_at: now,
            };
            match self.db.create_auth_session(session).await {
                Ok(()) => break,
                Err(PortError::Conflict(_)) if attempt < 3 => {
                    warn!("Session token collision, minting a new one");
                    attempt += 1;
                    token = mint_token();
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(IssuedSession {
            token,
            user,
            expires_at: now + max_age,
            max_age,
        })
    }
}

/// The new local name after an OAuth login, or `None` to keep the current
/// one. A name the user edited themselves is never overwritten.
pub fn oauth_name_update(existing: &User, provider_name: &str) -> Option<String> {
    let untouched = existing.name.trim().is_empty()
        || existing.provider_name.as_deref().map(str::trim) == Some(existing.name.trim());
    (untouched && !provider_name.trim().is_empty()).then(|| provider_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn user_named(name: &str, provider_name: Option<&str>) -> User {
        User {
            user_id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            surname: String::new(),
            email: "a@b.c".to_string(),
            phone: None,
            password_hash: None,
            auth_provider: Some(GOOGLE_PROVIDER.to_string()),
            provider_name: provider_name.map(str::to_string),
            picture: None,
            credits: DEFAULT_CREDITS,
            role: Role::User,
            is_verified: true,
            favorites: Vec::new(),
            last_credit_reset: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("gizli123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("gizli123", &hash));
        assert!(!verify_password("yanlis", &hash));
    }

    #[rstest]
    #[case("")]
    #[case("salt:digest")]
    #[case("$argon2id$bozuk")]
    fn malformed_hashes_fail_closed(#[case] stored: &str) {
        assert!(!verify_password("anything", stored));
    }

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = mint_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, mint_token());
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=from-cookie"),
        );
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("from-cookie"));

        headers.remove(header::COOKIE);
        assert_eq!(token_from_headers(&headers).as_deref(), Some("from-header"));

        headers.remove(header::AUTHORIZATION);
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn cookie_is_cross_site_when_secure() {
        let cookie = session_cookie("abc", Duration::days(7), true);
        assert!(cookie.starts_with("session_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[rstest]
    #[case("", Some("Ayşe Yılmaz"), Some("Ayşe Kaya"))]
    #[case("Ayşe Yılmaz", Some("Ayşe Yılmaz"), Some("Ayşe Kaya"))]
    #[case("Ayşecik", Some("Ayşe Yılmaz"), None)]
    fn oauth_name_rule(
        #[case] local: &str,
        #[case] last_provider: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let user = user_named(local, last_provider);
        assert_eq!(oauth_name_update(&user, "Ayşe Kaya").as_deref(), expected);
    }
}
