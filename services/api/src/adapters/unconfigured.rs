//! services/api/src/adapters/unconfigured.rs
//!
//! Stand-in for a provider whose credentials are missing. The server still
//! starts; every call reports `Unavailable` so the request fails with a clear
//! message instead of an opaque network error.

use async_trait::async_trait;
use masal_core::domain::{ModerationVerdict, OAuthProfile};
use masal_core::ports::{
    ModerationService, OAuthService, PortError, PortResult, StoryTextService,
    TextToSpeechService,
};

#[derive(Clone, Debug)]
pub struct UnconfiguredProvider {
    setting: &'static str,
}

impl UnconfiguredProvider {
    /// `setting` names the environment variable that would enable the provider.
    pub fn new(setting: &'static str) -> Self {
        Self { setting }
    }

    fn unavailable(&self) -> PortError {
        PortError::Unavailable(format!("{} is not configured", self.setting))
    }
}

#[async_trait]
impl StoryTextService for UnconfiguredProvider {
    async fn complete(&self, _system: &str, _prompt: &str) -> PortResult<String> {
        Err(self.unavailable())
    }
}

#[async_trait]
impl TextToSpeechService for UnconfiguredProvider {
    async fn synthesize(&self, _text: &str) -> PortResult<Vec<u8>> {
        Err(self.unavailable())
    }
}

#[async_trait]
impl ModerationService for UnconfiguredProvider {
    async fn moderate(&self, _text: &str) -> PortResult<ModerationVerdict> {
        Err(self.unavailable())
    }
}

#[async_trait]
impl OAuthService for UnconfiguredProvider {
    async fn exchange_code(&self, _code: &str) -> PortResult<OAuthProfile> {
        Err(self.unavailable())
    }
}
