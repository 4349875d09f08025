//! services/api/src/adapters/oauth.rs
//!
//! Google OAuth: authorization-code exchange followed by a userinfo lookup.

use async_trait::async_trait;
use masal_core::domain::OAuthProfile;
use masal_core::ports::{OAuthService, PortError, PortResult};
use serde::Deserialize;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Clone)]
pub struct GoogleOAuthAdapter {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthAdapter {
    pub fn new(
        http: reqwest::Client,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[async_trait]
impl OAuthService for GoogleOAuthAdapter {
    async fn exchange_code(&self, code: &str) -> PortResult<OAuthProfile> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PortError::Unauthorized);
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PortError::Unauthorized);
        }
        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let email = info
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| PortError::Unexpected("Google profile has no email".to_string()))?;
        Ok(OAuthProfile {
            name: info.name.unwrap_or_default(),
            email,
            picture: info.picture,
        })
    }
}
