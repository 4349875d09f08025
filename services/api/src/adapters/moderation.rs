//! services/api/src/adapters/moderation.rs
//!
//! Remote content moderation through the OpenAI moderation endpoint.

use async_openai::{config::OpenAIConfig, types::CreateModerationRequestArgs, Client};
use async_trait::async_trait;
use masal_core::domain::ModerationVerdict;
use masal_core::ports::{ModerationService, PortError, PortResult};

use super::classify_openai_error;

#[derive(Clone)]
pub struct OpenAiModerationAdapter {
    client: Client<OpenAIConfig>,
}

impl OpenAiModerationAdapter {
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModerationService for OpenAiModerationAdapter {
    async fn moderate(&self, text: &str) -> PortResult<ModerationVerdict> {
        let request = CreateModerationRequestArgs::default()
            .input(text.to_string())
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .moderations()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        let mut verdict = ModerationVerdict::default();
        for result in response.results {
            if !result.flagged {
                continue;
            }
            verdict.flagged = true;
            let c = &result.categories;
            let hits = [
                (c.sexual, "sexual"),
                (c.hate, "hate"),
                (c.violence, "violence"),
                (c.self_harm, "self-harm"),
                (c.harassment, "harassment"),
            ];
            for (hit, name) in hits {
                if hit && !verdict.categories.iter().any(|n| n == name) {
                    verdict.categories.push(name.to_string());
                }
            }
        }
        Ok(verdict)
    }
}
