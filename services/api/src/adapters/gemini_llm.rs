//! services/api/src/adapters/gemini_llm.rs
//!
//! Story text generation through the Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use masal_core::ports::{PortError, PortResult, StoryTextService};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::classify_provider_error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Clone)]
pub struct GeminiStoryAdapter {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiStoryAdapter {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl StoryTextService for GeminiStoryAdapter {
    async fn complete(&self, system: &str, prompt: &str) -> PortResult<String> {
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        let body = json!({
            "system_instruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.8 },
        });

        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PortError::QuotaExceeded("Gemini rate limit or quota reached".to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_provider_error(format!("Gemini returned {}: {}", status, text)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        parsed
            .into_text()
            .ok_or_else(|| PortError::Unexpected("Gemini returned no story text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parts_are_joined() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Başlık: Ay " }, { "text": "Dede\nMasal" }] } }]
        }))
        .unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("Başlık: Ay Dede\nMasal"));
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(parsed.into_text().is_none());
    }
}
