//! crates/masal_core/src/moderation.rs
//!
//! Content moderation for story inputs and generated stories.
//!
//! Two kinds of checks exist: a synchronous word filter over a normalized
//! form of the text, and an optional remote moderation service. Checks are
//! composed into a [`ModerationPipeline`] that runs them in order and stops at
//! the first rejection.

use async_trait::async_trait;
use std::sync::{Arc, LazyLock};
use tracing::warn;

use crate::ports::ModerationService;

/// Terms matched anywhere in the text, including after all spaces are
/// removed, so `k a t l i a m` is caught as well.
pub const BAD_WORDS: &[&str] = &[
    // Turkish profanity
    "orospu",
    "siktir",
    "sikerim",
    "sikeyim",
    "amcık",
    "yarrak",
    "dalyarak",
    "pezevenk",
    "kahpe",
    "gavat",
    "şerefsiz",
    "yavşak",
    "ibne",
    "gerizekalı",
    "götveren",
    // violence and sensitive topics
    "katliam",
    "cinayet",
    "öldürmek",
    "öldüreceğim",
    "intihar",
    "tecavüz",
    "işkence",
    "vahşet",
    "şeytan",
    "zombi",
    "terörist",
    "uyuşturucu",
    "kokain",
    "sigara",
    "kumar",
    "cinsel",
    // English
    "fuck",
    "shit",
    "bitch",
    "asshole",
    "bastard",
    "cunt",
    "porn",
    "suicide",
    "murder",
    "cocaine",
];

/// Short general-profanity terms. These only match whole words because they
/// occur inside innocent words ("class", "topic").
pub const PROFANITY_WORDS: &[&str] = &[
    "ass", "arse", "bollocks", "crap", "damn", "dick", "piss", "prick", "slut", "whore",
    "wanker", "twat", "sex", "sexy", "nude", "kill", "nazi", "amk", "aq", "oç", "piç", "puşt",
    "aptal", "salak",
];

static NORMALIZED_BAD_WORDS: LazyLock<Vec<(&'static str, String, String)>> = LazyLock::new(|| {
    BAD_WORDS
        .iter()
        .map(|word| {
            let normalized = normalize(word);
            let compact = normalized.replace(' ', "");
            (*word, normalized, compact)
        })
        .collect()
});

static NORMALIZED_PROFANITY: LazyLock<Vec<String>> =
    LazyLock::new(|| PROFANITY_WORDS.iter().map(|w| normalize(w)).collect());

/// Lowercases, maps Turkish letters and look-alike digits/symbols to plain
/// Latin letters, drops every other non-alphanumeric character and collapses
/// whitespace.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        let mapped = match ch {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            'â' | 'à' | 'á' | 'ä' => 'a',
            'î' | 'ì' | 'í' | 'ï' => 'i',
            'û' | 'ù' | 'ú' => 'u',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'ô' | 'ò' | 'ó' => 'o',
            '0' => 'o',
            '1' | '!' | '|' => 'i',
            '3' => 'e',
            '4' | '@' => 'a',
            '5' | '$' => 's',
            '7' | '+' => 't',
            '8' => 'b',
            c if c.is_whitespace() => ' ',
            c if c.is_ascii_alphanumeric() => c,
            _ => continue,
        };
        out.push(mapped);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the first listed term found in `text`, if any.
pub fn find_bad_content(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    let compact = normalized.replace(' ', "");
    let lowered = text.to_lowercase();
    let lowered_compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();

    for (word, normalized_word, compact_word) in NORMALIZED_BAD_WORDS.iter() {
        if compact_word.is_empty() {
            continue;
        }
        if normalized.contains(normalized_word.as_str())
            || compact.contains(compact_word.as_str())
            || lowered.contains(word)
            || lowered_compact.contains(word)
        {
            return Some(*word);
        }
    }

    let tokens = candidate_tokens(&normalized);
    PROFANITY_WORDS
        .iter()
        .zip(NORMALIZED_PROFANITY.iter())
        .find(|(_, normalized_word)| tokens.iter().any(|t| t == *normalized_word))
        .map(|(word, _)| *word)
}

pub fn contains_bad_content(text: &str) -> bool {
    find_bad_content(text).is_some()
}

// Whole words of the text, plus every run of single letters glued back
// together ("s e x" -> "sex").
fn candidate_tokens(normalized: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut spelled = String::new();
    for token in normalized.split(' ').filter(|t| !t.is_empty()) {
        tokens.push(token.to_string());
        if token.chars().count() == 1 {
            spelled.push_str(token);
        } else if !spelled.is_empty() {
            tokens.push(std::mem::take(&mut spelled));
        }
    }
    if !spelled.is_empty() {
        tokens.push(spelled);
    }
    tokens
}

//=========================================================================================
// Validator pipeline
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(String),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// One stage of the moderation pipeline. `label` is the user-facing name of
/// the field being checked and ends up in the rejection message.
#[async_trait]
pub trait ContentCheck: Send + Sync {
    async fn check(&self, label: &str, text: &str) -> Verdict;
}

/// The word-list filter.
pub struct LocalWordFilter;

#[async_trait]
impl ContentCheck for LocalWordFilter {
    async fn check(&self, label: &str, text: &str) -> Verdict {
        match find_bad_content(text) {
            Some(_) => Verdict::Reject(format!(
                "'{label}' alanında uygunsuz içerik tespit edildi. Lütfen çocuklara uygun ifadeler kullanın."
            )),
            None => Verdict::Accept,
        }
    }
}

/// Asks the remote moderation service. Any failure of the call itself
/// (timeout, missing key) accepts the text.
pub struct RemoteModerationCheck {
    service: Arc<dyn ModerationService>,
}

impl RemoteModerationCheck {
    pub fn new(service: Arc<dyn ModerationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContentCheck for RemoteModerationCheck {
    async fn check(&self, label: &str, text: &str) -> Verdict {
        match self.service.moderate(text).await {
            Ok(verdict) if verdict.flagged => {
                let reasons: Vec<&str> = verdict
                    .categories
                    .iter()
                    .map(|c| category_label(c))
                    .collect();
                let reasons = if reasons.is_empty() {
                    "uygunsuz içerik".to_string()
                } else {
                    reasons.join(", ")
                };
                Verdict::Reject(format!(
                    "'{label}' alanı içerik denetiminden geçemedi: {reasons}"
                ))
            }
            Ok(_) => Verdict::Accept,
            Err(e) => {
                warn!("Remote moderation unavailable, accepting '{label}': {e}");
                Verdict::Accept
            }
        }
    }
}

fn category_label(category: &str) -> &str {
    match category {
        "sexual" => "cinsel içerik",
        "hate" => "nefret söylemi",
        "violence" => "şiddet",
        "self-harm" => "kendine zarar verme",
        "harassment" => "taciz",
        other => other,
    }
}

/// Ordered checks with short-circuit on the first rejection.
#[derive(Clone)]
pub struct ModerationPipeline {
    stages: Vec<Arc<dyn ContentCheck>>,
}

impl ModerationPipeline {
    pub fn new(stages: Vec<Arc<dyn ContentCheck>>) -> Self {
        Self { stages }
    }

    /// Word filter only.
    pub fn local() -> Self {
        Self::new(vec![Arc::new(LocalWordFilter)])
    }

    /// Word filter, then the remote service when one is given.
    pub fn with_remote(remote: Option<Arc<dyn ModerationService>>) -> Self {
        let mut stages: Vec<Arc<dyn ContentCheck>> = vec![Arc::new(LocalWordFilter)];
        if let Some(service) = remote {
            stages.push(Arc::new(RemoteModerationCheck::new(service)));
        }
        Self::new(stages)
    }

    pub async fn check(&self, label: &str, text: &str) -> Verdict {
        for stage in &self.stages {
            let verdict = stage.check(label, text).await;
            if !verdict.is_accept() {
                return verdict;
            }
        }
        Verdict::Accept
    }

    /// Checks each non-empty field in order, reporting the first offender.
    pub async fn check_fields(&self, fields: &[(&str, Option<&str>)]) -> Verdict {
        for (label, value) in fields {
            let Some(text) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let verdict = self.check(label, text).await;
            if !verdict.is_accept() {
                return verdict;
            }
        }
        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModerationVerdict;
    use crate::ports::{PortError, PortResult};
    use rstest::rstest;

    #[rstest]
    #[case("Şeker GİBİ", "seker gibi")]
    #[case("k4tl!4m", "katliam")]
    #[case("  çok   güzel, bir masal. ", "cok guzel bir masal")]
    #[case("$1g@r@", "sigara")]
    fn normalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn every_listed_word_is_caught_alone_and_spaced_out() {
        for word in BAD_WORDS {
            assert!(contains_bad_content(word), "{word} not caught");
            let spaced: String = word
                .chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            assert!(contains_bad_content(&spaced), "{spaced} not caught");
        }
    }

    #[rstest]
    #[case("Tavşan ile kaplumbağanın dostluğu")]
    #[case("Paylaşmayı öğrenen küçük ayı")]
    #[case("A classic topic about friendship")]
    #[case("Kalbim nasıl çalışır?")]
    fn clean_text_passes(#[case] text: &str) {
        assert_eq!(find_bad_content(text), None);
    }

    #[rstest]
    #[case("bu çok aptal bir fikir")]
    #[case("s e x")]
    #[case("KILL the dragon")]
    fn profanity_matches_whole_words(#[case] text: &str) {
        assert!(contains_bad_content(text));
    }

    #[rstest]
    #[case("1nt1h@r")]
    #[case("C.i.n.a.y.e.t")]
    #[case("TECAVÜZ")]
    fn obfuscated_terms_are_caught(#[case] text: &str) {
        assert!(contains_bad_content(text));
    }

    struct Flagging(Vec<&'static str>);

    #[async_trait]
    impl ModerationService for Flagging {
        async fn moderate(&self, _text: &str) -> PortResult<ModerationVerdict> {
            Ok(ModerationVerdict {
                flagged: true,
                categories: self.0.iter().map(|c| c.to_string()).collect(),
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl ModerationService for Broken {
        async fn moderate(&self, _text: &str) -> PortResult<ModerationVerdict> {
            Err(PortError::Unavailable("no key".to_string()))
        }
    }

    #[tokio::test]
    async fn pipeline_reports_the_offending_field() {
        let pipeline = ModerationPipeline::local();
        let verdict = pipeline
            .check_fields(&[
                ("Konu", Some("Doğa")),
                ("Karakter", None),
                ("Tema", Some("katliam")),
            ])
            .await;
        match verdict {
            Verdict::Reject(msg) => assert!(msg.contains("'Tema'")),
            Verdict::Accept => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn remote_flag_lists_categories() {
        let pipeline = ModerationPipeline::with_remote(Some(Arc::new(Flagging(vec![
            "violence",
            "hate",
        ]))));
        let verdict = pipeline.check("Tema", "zararsız görünen metin").await;
        assert_eq!(
            verdict,
            Verdict::Reject(
                "'Tema' alanı içerik denetiminden geçemedi: şiddet, nefret söylemi".to_string()
            )
        );
    }

    #[tokio::test]
    async fn remote_failure_is_treated_as_pass() {
        let pipeline = ModerationPipeline::with_remote(Some(Arc::new(Broken)));
        assert!(pipeline.check("Tema", "orman macerası").await.is_accept());
    }

    #[tokio::test]
    async fn local_hit_short_circuits_remote() {
        let pipeline = ModerationPipeline::with_remote(Some(Arc::new(Broken)));
        let verdict = pipeline.check("Tema", "intihar").await;
        assert!(!verdict.is_accept());
        assert!(matches!(verdict, Verdict::Reject(msg) if msg.contains("uygunsuz içerik tespit")));
    }
}
