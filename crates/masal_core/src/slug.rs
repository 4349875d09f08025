//! crates/masal_core/src/slug.rs
//!
//! SEO slugs for stories: a Turkish-aware transliteration of the title, plus
//! collision resolution against stories already persisted.

use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use uuid::Uuid;

use crate::ports::{DatabaseService, PortResult};

/// Slugs keep at most this many hyphen-separated words.
pub const MAX_SLUG_WORDS: usize = 6;

/// Numbered probes before falling back to a random suffix.
pub const MAX_SLUG_ATTEMPTS: u32 = 100;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Builds a slug from a title. When `age_group` is given and the title does
/// not already mention it, the slug starts with the age group.
pub fn generate_slug(title: &str, age_group: Option<&str>) -> String {
    let source = match age_group.map(str::trim).filter(|a| !a.is_empty()) {
        Some(age) if !title.contains(age) => format!("{age} yaş {title}"),
        _ => title.to_string(),
    };

    let mut transliterated = String::with_capacity(source.len());
    for ch in source.chars() {
        match ch {
            'ç' | 'Ç' => transliterated.push('c'),
            'ğ' | 'Ğ' => transliterated.push('g'),
            'ı' | 'İ' | 'I' => transliterated.push('i'),
            'ö' | 'Ö' => transliterated.push('o'),
            'ş' | 'Ş' => transliterated.push('s'),
            'ü' | 'Ü' => transliterated.push('u'),
            'â' | 'Â' => transliterated.push('a'),
            'î' | 'Î' => transliterated.push('i'),
            'û' | 'Û' => transliterated.push('u'),
            'ß' => transliterated.push_str("ss"),
            'æ' | 'Æ' => transliterated.push_str("ae"),
            'œ' | 'Œ' => transliterated.push_str("oe"),
            'ø' | 'Ø' => transliterated.push('o'),
            'ł' | 'Ł' => transliterated.push('l'),
            other => transliterated.push(other),
        }
    }

    let stripped: String = transliterated
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let hyphenated = NON_ALNUM.replace_all(&stripped, "-");
    hyphenated
        .trim_matches('-')
        .split('-')
        .filter(|w| !w.is_empty())
        .take(MAX_SLUG_WORDS)
        .collect::<Vec<_>>()
        .join("-")
}

/// The one storage query slug resolution needs.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool>;
}

#[async_trait]
impl<T: DatabaseService + ?Sized> SlugLookup for T {
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool> {
        self.slug_exists(slug, exclude).await
    }
}

/// Returns `base` if free, otherwise `base-1`, `base-2`, ... up to
/// [`MAX_SLUG_ATTEMPTS`], and finally `base-<random hex>` without probing.
/// `exclude` is the story being re-slugged, whose own slug does not count.
pub async fn ensure_unique_slug<S: SlugLookup + ?Sized>(
    store: &S,
    base: &str,
    exclude: Option<Uuid>,
) -> PortResult<String> {
    let base = if base.is_empty() { "masal" } else { base };

    if !store.slug_taken(base, exclude).await? {
        return Ok(base.to_string());
    }

    for counter in 1..=MAX_SLUG_ATTEMPTS {
        let candidate = format!("{base}-{counter}");
        if !store.slug_taken(&candidate, exclude).await? {
            return Ok(candidate);
        }
    }

    let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    let fallback = format!("{base}-{suffix:06x}");
    warn!("Slug '{base}' exhausted numbered suffixes, using '{fallback}'");
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn turkish_title_becomes_ascii_slug() {
        let slug = generate_slug("Cesur Tavşan'ın Maceraları", None);
        assert_eq!(slug, "cesur-tavsan-in-maceralari");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }

    #[rstest]
    #[case("  --Işıl ile Güneş!!  ", None, "isil-ile-gunes")]
    #[case("Çiftlikteki Ördek", Some("4-5"), "4-5-yas-ciftlikteki-ordek")]
    #[case("4-5 Yaş İçin Paylaşmak", Some("4-5"), "4-5-yas-icin-paylasmak")]
    #[case("Crème brûlée Şöleni", None, "creme-brulee-soleni")]
    #[case("Bir varmış bir yokmuş evvel zaman içinde kalbur saman", None, "bir-varmis-bir-yokmus-evvel-zaman")]
    #[case("!!!", None, "")]
    fn slug_cases(#[case] title: &str, #[case] age: Option<&str>, #[case] expected: &str) {
        assert_eq!(generate_slug(title, age), expected);
    }

    struct TakenSlugs {
        taken: HashSet<String>,
        owner: Option<(String, Uuid)>,
        probes: AtomicU32,
    }

    impl TakenSlugs {
        fn new(taken: &[&str]) -> Self {
            Self {
                taken: taken.iter().map(|s| s.to_string()).collect(),
                owner: None,
                probes: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SlugLookup for TakenSlugs {
        async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> PortResult<bool> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            if let (Some((owned, owner)), Some(excluded)) = (&self.owner, exclude) {
                if owned == slug && *owner == excluded {
                    return Ok(false);
                }
            }
            Ok(self.taken.contains(slug))
        }
    }

    #[tokio::test]
    async fn free_slug_is_returned_as_is() {
        let store = TakenSlugs::new(&[]);
        assert_eq!(
            ensure_unique_slug(&store, "cesur-tavsan", None).await.unwrap(),
            "cesur-tavsan"
        );
    }

    #[tokio::test]
    async fn collision_gets_numbered_suffix() {
        let store = TakenSlugs::new(&["cesur-tavsan"]);
        for _ in 0..2 {
            assert_eq!(
                ensure_unique_slug(&store, "cesur-tavsan", None).await.unwrap(),
                "cesur-tavsan-1"
            );
        }

        let store = TakenSlugs::new(&["cesur-tavsan", "cesur-tavsan-1", "cesur-tavsan-2"]);
        assert_eq!(
            ensure_unique_slug(&store, "cesur-tavsan", None).await.unwrap(),
            "cesur-tavsan-3"
        );
    }

    #[tokio::test]
    async fn own_slug_is_not_a_collision() {
        let id = Uuid::new_v4();
        let mut store = TakenSlugs::new(&["cesur-tavsan"]);
        store.owner = Some(("cesur-tavsan".to_string(), id));
        assert_eq!(
            ensure_unique_slug(&store, "cesur-tavsan", Some(id)).await.unwrap(),
            "cesur-tavsan"
        );
    }

    #[tokio::test]
    async fn exhausted_suffixes_fall_back_to_random_hex() {
        let mut taken = vec!["masal".to_string()];
        taken.extend((1..=MAX_SLUG_ATTEMPTS).map(|i| format!("masal-{i}")));
        let refs: Vec<&str> = taken.iter().map(String::as_str).collect();
        let store = TakenSlugs::new(&refs);

        let slug = ensure_unique_slug(&store, "", None).await.unwrap();
        let suffix = slug.strip_prefix("masal-").expect("keeps base");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(store.probes.load(Ordering::SeqCst), MAX_SLUG_ATTEMPTS + 1);
    }
}
