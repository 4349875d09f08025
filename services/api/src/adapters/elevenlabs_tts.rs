//! services/api/src/adapters/elevenlabs_tts.rs
//!
//! Speech synthesis through the ElevenLabs REST API.

use async_trait::async_trait;
use masal_core::ports::{PortError, PortResult, TextToSpeechService};
use reqwest::StatusCode;
use serde_json::json;

use super::classify_provider_error;

const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const ELEVENLABS_MODEL: &str = "eleven_multilingual_v2";

#[derive(Clone)]
pub struct ElevenLabsTtsAdapter {
    http: reqwest::Client,
    api_key: String,
    voice_id: String,
    speed: f32,
}

impl ElevenLabsTtsAdapter {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        voice_id: impl Into<String>,
        speed: f32,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            // ElevenLabs accepts a narrower speed range than OpenAI.
            speed: speed.clamp(0.7, 1.2),
        }
    }
}

#[async_trait]
impl TextToSpeechService for ElevenLabsTtsAdapter {
    async fn synthesize(&self, text: &str) -> PortResult<Vec<u8>> {
        let url = format!("{}/{}", ELEVENLABS_BASE_URL, self.voice_id);
        let body = json!({
            "text": text,
            "model_id": ELEVENLABS_MODEL,
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "speed": self.speed,
            },
        });

        let response = self
            .http
            .post(url)
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PortError::QuotaExceeded("ElevenLabs quota reached".to_string()));
        }
        if !status.is_success() {
            // Exhausted character quota comes back as 401 with `quota_exceeded` in the body.
            let text = response.text().await.unwrap_or_default();
            return Err(classify_provider_error(format!(
                "ElevenLabs returned {}: {}",
                status, text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
