pub mod db;
pub mod elevenlabs_tts;
pub mod gemini_llm;
pub mod memory;
pub mod moderation;
pub mod oauth;
pub mod story_llm;
pub mod tts;
pub mod unconfigured;

pub use db::DbAdapter;
pub use elevenlabs_tts::ElevenLabsTtsAdapter;
pub use gemini_llm::GeminiStoryAdapter;
pub use memory::MemoryDb;
pub use moderation::OpenAiModerationAdapter;
pub use oauth::GoogleOAuthAdapter;
pub use story_llm::OpenAiStoryAdapter;
pub use tts::OpenAiTtsAdapter;
pub use unconfigured::UnconfiguredProvider;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use masal_core::ports::PortError;
use std::time::Duration;

/// A reqwest client with an optional whole-request timeout.
pub fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Retry policy that gives up immediately, so a failed OpenAI call reaches
/// the adapter at once.
pub fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// An OpenAI client bounded by `timeout` that never retries.
pub fn openai_client(api_key: &str, timeout: Duration) -> reqwest::Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config)
        .with_http_client(http_client(Some(timeout))?)
        .with_backoff(no_retry_backoff()))
}

/// Error codes the OpenAI API uses for an exhausted account or a rate limit.
const OPENAI_QUOTA_CODES: &[&str] = &["insufficient_quota", "rate_limit_exceeded"];

fn mentions_quota(message: &str) -> bool {
    message.to_lowercase().contains("quota")
}

/// Sorts a failed HTTP provider response body into quota exhaustion or a
/// generic error. Callers handle a 429 status themselves.
pub(crate) fn classify_provider_error(message: String) -> PortError {
    if mentions_quota(&message) {
        PortError::QuotaExceeded(message)
    } else {
        PortError::Unexpected(message)
    }
}

/// Maps an async-openai failure onto the port error, reading the structured
/// `code` and `type` of API errors before falling back to the message text.
pub(crate) fn classify_openai_error(error: OpenAIError) -> PortError {
    match &error {
        OpenAIError::ApiError(api) => {
            let quota_code = [api.code.as_deref(), api.r#type.as_deref()]
                .into_iter()
                .flatten()
                .any(|code| OPENAI_QUOTA_CODES.contains(&code));
            if quota_code || mentions_quota(&api.message) {
                PortError::QuotaExceeded(error.to_string())
            } else {
                PortError::Unexpected(error.to_string())
            }
        }
        _ => PortError::Unexpected(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;
    use backoff::backoff::Backoff;
    use serde_json::json;

    fn api_error(body: serde_json::Value) -> OpenAIError {
        OpenAIError::ApiError(serde_json::from_value::<ApiError>(body).unwrap())
    }

    #[test]
    fn openai_clients_do_not_retry() {
        let mut policy = no_retry_backoff();
        assert_eq!(policy.next_backoff(), None);
    }

    #[test]
    fn quota_messages_are_recognised() {
        assert!(matches!(
            classify_provider_error("ElevenLabs returned 401: {\"status\":\"quota_exceeded\"}".into()),
            PortError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_provider_error("connection reset".into()),
            PortError::Unexpected(_)
        ));
    }

    #[test]
    fn numbers_in_a_message_are_not_a_quota_signal() {
        assert!(matches!(
            classify_provider_error("Gemini returned 400: input of 4290 tokens".into()),
            PortError::Unexpected(_)
        ));
        assert!(matches!(
            classify_openai_error(api_error(json!({
                "message": "Request req_429abc failed validation",
                "type": "invalid_request_error",
                "code": "invalid_value",
            }))),
            PortError::Unexpected(_)
        ));
    }

    #[test]
    fn openai_codes_decide_quota() {
        assert!(matches!(
            classify_openai_error(api_error(json!({
                "message": "You exceeded your current limit.",
                "type": "insufficient_quota",
                "code": "insufficient_quota",
            }))),
            PortError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_openai_error(api_error(json!({
                "message": "Slow down.",
                "type": "requests",
                "code": "rate_limit_exceeded",
            }))),
            PortError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_openai_error(OpenAIError::InvalidArgument("empty input".into())),
            PortError::Unexpected(_)
        ));
    }
}
