//! crates/masal_core/src/generation.rs
//!
//! The story generation use case. One call walks a fixed sequence of stages:
//! credit check, topic resolution, input moderation, text generation, output
//! moderation, speech synthesis, slug resolution and persistence. Any stage
//! can end the request; only an exhausted speech quota is downgraded to a
//! warning.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog;
use crate::domain::{Story, User};
use crate::error::{ServiceError, ServiceResult};
use crate::moderation::{ModerationPipeline, Verdict};
use crate::ports::{
    DatabaseService, ModerationService, PortError, StoryTextService, TextToSpeechService,
};
use crate::slug::{ensure_unique_slug, generate_slug};

/// Title used when the model output has no title line.
pub const DEFAULT_TITLE: &str = "Sihirli Masal";

/// Longest text sent to the speech provider, in characters.
pub const TTS_MAX_CHARS: usize = 4000;

/// Words per minute read at the reference speaking rate of 0.9.
const BASE_WORDS_PER_MINUTE: f64 = 150.0;
const REFERENCE_SPEED: f64 = 0.9;

pub const QUOTA_WARNING: &str =
    "Ses servisi kotası dolduğu için masal sesli anlatım olmadan kaydedildi.";

const STORY_SYSTEM_PROMPT: &str = r#"Sen 4-8 yaş arası çocuklar için Türkçe masallar yazan deneyimli bir masal yazarısın.

Uyman gereken kurallar:
- Yalnızca Türkçe yaz.
- Masal 800-1200 kelime olsun; sesli okunduğunda 5-10 dakika sürsün.
- Korku, şiddet, kaba dil ve yetişkinlere yönelik hiçbir içerik olmasın.
- Kısa, akıcı ve seslendirmeye uygun cümleler kur; sıcak ve sevecen bir dil kullan.
- Masal "Bir varmış, bir yokmuş" diye başlasın.
- Masal olumlu bir mesaj ve mutlu bir sonla bitsin.
- Bir kazanım verildiyse masal o kazanımı desteklesin.

Çıktı biçimi:
Başlık: [masalın adı]

[masal metni]"#;

/// What the client asks for.
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub topic_id: String,
    pub subtopic_id: Option<String>,
    pub theme: String,
    pub age_group: String,
    pub character: Option<String>,
    /// Attach the subtopic's kazanım and steer the story towards it.
    pub kazanim_based: bool,
}

/// A persisted story plus the non-fatal audio warning, if any.
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    pub story: Story,
    pub audio_warning: Option<String>,
}

#[derive(Clone)]
pub struct StoryGenerator {
    db: Arc<dyn DatabaseService>,
    text: Arc<dyn StoryTextService>,
    speech: Arc<dyn TextToSpeechService>,
    input_moderation: ModerationPipeline,
    output_moderation: ModerationPipeline,
    words_per_minute: f64,
}

impl StoryGenerator {
    /// `remote_moderation` is only consulted for the request fields; the
    /// generated text is checked against the word filter alone.
    pub fn new(
        db: Arc<dyn DatabaseService>,
        text: Arc<dyn StoryTextService>,
        speech: Arc<dyn TextToSpeechService>,
        remote_moderation: Option<Arc<dyn ModerationService>>,
    ) -> Self {
        Self {
            db,
            text,
            speech,
            input_moderation: ModerationPipeline::with_remote(remote_moderation),
            output_moderation: ModerationPipeline::local(),
            words_per_minute: BASE_WORDS_PER_MINUTE,
        }
    }

    /// Tunes the duration estimate to the configured speech speed.
    pub fn with_speaking_rate(mut self, speed: f32) -> Self {
        if speed > 0.0 {
            self.words_per_minute = BASE_WORDS_PER_MINUTE * f64::from(speed) / REFERENCE_SPEED;
        }
        self
    }

    pub async fn generate(
        &self,
        request: StoryRequest,
        user: Option<&User>,
    ) -> ServiceResult<GeneratedStory> {
        if let Some(user) = user {
            if user.credits <= 0 {
                return Err(ServiceError::PaymentRequired(
                    "Masal oluşturmak için yeterli krediniz yok. Kredi talebinde bulunabilirsiniz."
                        .to_string(),
                ));
            }
        }

        if request.theme.trim().is_empty() || request.age_group.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Tema ve yaş grubu zorunludur".to_string(),
            ));
        }

        let topic = catalog::topic(&request.topic_id)
            .ok_or_else(|| ServiceError::Validation("Geçersiz konu".to_string()))?;
        let subtopic = request
            .subtopic_id
            .as_deref()
            .and_then(|id| topic.subtopic(id));
        let kazanim = subtopic
            .filter(|_| request.kazanim_based)
            .map(|s| s.kazanim);

        let verdict = self
            .input_moderation
            .check_fields(&[
                ("Konu", Some(topic.name)),
                ("Alt konu", subtopic.map(|s| s.name)),
                ("Tema", Some(request.theme.as_str())),
                ("Karakter", request.character.as_deref()),
                ("Kazanım", kazanim),
            ])
            .await;
        if let Verdict::Reject(reason) = verdict {
            return Err(ServiceError::Moderation(reason));
        }

        info!(
            "Generating story: topic={}, subtopic={:?}, theme={}",
            topic.id,
            subtopic.map(|s| s.id),
            request.theme
        );

        let prompt = compose_prompt(
            topic.name,
            subtopic.map(|s| s.name),
            &request.theme,
            &request.age_group,
            request.character.as_deref(),
            kazanim,
        );
        let raw = self
            .text
            .complete(STORY_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| match e {
                PortError::Unavailable(msg) => ServiceError::ProviderUnavailable(format!(
                    "Yapay zeka servisi yapılandırılmamış: {msg}"
                )),
                other => {
                    ServiceError::Provider(format!("Masal üretilirken hata oluştu: {other}"))
                }
            })?;
        let (title, content) = parse_story_response(&raw);

        if let Verdict::Reject(_) = self
            .output_moderation
            .check("Masal", &format!("{title}\n{content}"))
            .await
        {
            warn!("Generated story rejected by the word filter: '{title}'");
            return Err(ServiceError::Moderation(
                "Oluşturulan masal içerik denetiminden geçemedi. Lütfen farklı bir tema deneyin."
                    .to_string(),
            ));
        }

        let (audio_base64, duration, audio_warning) =
            match self.speech.synthesize(truncate_chars(&content, TTS_MAX_CHARS)).await {
                Ok(audio) => (
                    Some(STANDARD.encode(audio)),
                    Some(self.estimate_duration(&content)),
                    None,
                ),
                Err(PortError::QuotaExceeded(msg)) => {
                    warn!("TTS quota exceeded, saving story without audio: {msg}");
                    (None, None, Some(QUOTA_WARNING.to_string()))
                }
                Err(PortError::Unavailable(msg)) => {
                    return Err(ServiceError::ProviderUnavailable(format!(
                        "Ses servisi yapılandırılmamış: {msg}"
                    )))
                }
                Err(other) => {
                    return Err(ServiceError::Provider(format!(
                        "Ses üretilirken hata oluştu: {other}"
                    )))
                }
            };

        let slug = ensure_unique_slug(
            self.db.as_ref(),
            &generate_slug(&title, Some(&request.age_group)),
            None,
        )
        .await?;

        let story = Story {
            id: Uuid::new_v4(),
            slug: Some(slug),
            title,
            content,
            topic_id: topic.id.to_string(),
            topic_name: topic.name.to_string(),
            subtopic_id: subtopic.map(|s| s.id.to_string()),
            subtopic_name: subtopic.map(|s| s.name.to_string()),
            kazanim: kazanim.map(str::to_string),
            theme: request.theme,
            age_group: request.age_group,
            character: request.character.filter(|c| !c.trim().is_empty()),
            audio_base64,
            duration,
            play_count: 0,
            created_at: Utc::now(),
            user_id: user.map(|u| u.user_id),
        };

        let charged = self.db.insert_story(&story, story.user_id).await?;
        if let Some(user_id) = story.user_id {
            if !charged {
                warn!("Story {} saved but user {user_id} had no credit left to charge", story.id);
            }
        }
        info!("Story created: {}", story.id);

        Ok(GeneratedStory {
            story,
            audio_warning,
        })
    }

    /// Spoken length in whole seconds.
    pub fn estimate_duration(&self, text: &str) -> i32 {
        let words = text.split_whitespace().count() as f64;
        (words / self.words_per_minute * 60.0) as i32
    }
}

fn compose_prompt(
    topic_name: &str,
    subtopic_name: Option<&str>,
    theme: &str,
    age_group: &str,
    character: Option<&str>,
    kazanim: Option<&str>,
) -> String {
    let mut prompt = format!("Ana konu: {topic_name}\n");
    if let Some(subtopic) = subtopic_name {
        prompt.push_str(&format!("Alt konu: {subtopic}\n"));
    }
    prompt.push_str(&format!("Tema: {theme}\nYaş grubu: {age_group}\n"));
    match character.filter(|c| !c.trim().is_empty()) {
        Some(character) => prompt.push_str(&format!("Ana karakter: {character}\n")),
        None => prompt.push_str("Ana karakteri sen seç (çocuklara uygun bir karakter)\n"),
    }
    if let Some(kazanim) = kazanim {
        prompt.push_str(&format!(
            "\nHedef kazanım: {kazanim}\nMasal bu kazanımı destekleyecek şekilde kurgulanmalı.\n"
        ));
    }
    prompt.push_str("\nBu bilgilere göre eğitici ve eğlenceli bir masal yaz.");
    prompt
}

/// Splits model output into `(title, content)` at the first title line.
/// Without one, the whole output is the content and the title is
/// [`DEFAULT_TITLE`].
pub fn parse_story_response(raw: &str) -> (String, String) {
    let raw = raw.trim();
    let lines: Vec<&str> = raw.lines().collect();

    for (index, line) in lines.iter().enumerate() {
        let cleaned = line.trim().trim_start_matches(['#', '*', ' ']);
        let lowered = cleaned.to_lowercase();
        let is_title = ["başlık:", "başlik:", "title:"]
            .iter()
            .any(|marker| lowered.starts_with(marker));
        if !is_title {
            continue;
        }

        let title = cleaned
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or_default()
            .trim()
            .trim_matches(['*', '"', '“', '”', ' '])
            .to_string();
        let content = lines[index + 1..].join("\n").trim().to_string();
        let title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        };
        return (title, content);
    }

    (DEFAULT_TITLE.to_string(), raw.to_string())
}

/// The first `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_line_splits_head_and_body() {
        let raw = "Başlık: Cesur Tavşan\n\nBir varmış bir yokmuş...\nSonunda mutlu olmuşlar.";
        let (title, content) = parse_story_response(raw);
        assert_eq!(title, "Cesur Tavşan");
        assert_eq!(content, "Bir varmış bir yokmuş...\nSonunda mutlu olmuşlar.");
    }

    #[test]
    fn markdown_title_is_cleaned() {
        let (title, content) = parse_story_response("**Başlık: \"Yıldız Avcısı\"**\nMetin");
        assert_eq!(title, "Yıldız Avcısı");
        assert_eq!(content, "Metin");
    }

    #[test]
    fn missing_marker_keeps_whole_text() {
        let (title, content) = parse_story_response("  Bir varmış bir yokmuş.  ");
        assert_eq!(title, DEFAULT_TITLE);
        assert_eq!(content, "Bir varmış bir yokmuş.");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("şğüöç", 3), "şğü");
        assert_eq!(truncate_chars("kısa", 10), "kısa");
    }

    #[test]
    fn prompt_mentions_kazanim_only_when_given() {
        let with = compose_prompt("Doğa", Some("Su tasarrufu"), "dostluk", "4-5", None, Some("Suyu korur."));
        assert!(with.contains("Hedef kazanım: Suyu korur."));
        assert!(with.contains("Ana karakteri sen seç"));
        let without = compose_prompt("Doğa", None, "dostluk", "4-5", Some("Pıtırcık"), None);
        assert!(!without.contains("kazanım"));
        assert!(without.contains("Ana karakter: Pıtırcık"));
    }
}
