//! services/api/src/adapters/tts.rs
//!
//! This module contains the adapter for OpenAI's Text-to-Speech (TTS) service.
//! It implements the `TextToSpeechService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use masal_core::ports::{PortResult, TextToSpeechService};

use super::classify_openai_error;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `TextToSpeechService` port using the OpenAI TTS API.
#[derive(Clone)]
pub struct OpenAiTtsAdapter {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
    speed: f32,
}

impl OpenAiTtsAdapter {
    /// Creates a new `OpenAiTtsAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: SpeechModel, voice: Voice, speed: f32) -> Self {
        Self {
            client,
            model,
            voice,
            speed,
        }
    }
}

/// Maps a configured voice name onto the API's voice list. Unknown names fall
/// back to `shimmer`, the calm voice used for bedtime stories.
pub fn parse_voice(name: &str) -> Voice {
    match name.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        _ => Voice::Shimmer,
    }
}

//=========================================================================================
// `TextToSpeechService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextToSpeechService for OpenAiTtsAdapter {
    /// Generates mp3 audio data (`Vec<u8>`) from the given text.
    async fn synthesize(&self, text: &str) -> PortResult<Vec<u8>> {
        let request = CreateSpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
            speed: Some(self.speed),
            ..Default::default()
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(classify_openai_error)?;

        Ok(response.bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_voice_defaults_to_shimmer() {
        assert!(matches!(parse_voice("Nova"), Voice::Nova));
        assert!(matches!(parse_voice("robot"), Voice::Shimmer));
    }
}
