//! crates/masal_core/src/catalog/mod.rs
//!
//! The read-only topic taxonomy: topics, their subtopics and the pedagogical
//! objective ("kazanım") attached to every subtopic. The table is compiled in
//! and never mutated.

mod topics;

use topics::TOPICS;

#[derive(Debug)]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub subtopics: &'static [Subtopic],
}

impl Topic {
    pub fn subtopic_count(&self) -> usize {
        self.subtopics.len()
    }

    pub fn subtopic(&self, subtopic_id: &str) -> Option<&'static Subtopic> {
        self.subtopics.iter().find(|s| s.id == subtopic_id)
    }
}

#[derive(Debug)]
pub struct Subtopic {
    pub id: &'static str,
    pub name: &'static str,
    pub kazanim: &'static str,
}

/// A subtopic together with the topic that owns it.
#[derive(Debug, Clone, Copy)]
pub struct SubtopicEntry {
    pub topic: &'static Topic,
    pub subtopic: &'static Subtopic,
}

pub fn all_topics() -> &'static [Topic] {
    TOPICS
}

pub fn topic(topic_id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == topic_id)
}

pub fn subtopics(topic_id: &str) -> Option<&'static [Subtopic]> {
    topic(topic_id).map(|t| t.subtopics)
}

pub fn subtopic(topic_id: &str, subtopic_id: &str) -> Option<&'static Subtopic> {
    topic(topic_id).and_then(|t| t.subtopic(subtopic_id))
}

/// Every subtopic of every topic, in table order.
pub fn all_subtopics() -> Vec<SubtopicEntry> {
    TOPICS
        .iter()
        .flat_map(|topic| {
            topic
                .subtopics
                .iter()
                .map(move |subtopic| SubtopicEntry { topic, subtopic })
        })
        .collect()
}

/// Case-insensitive substring search over all kazanım strings.
pub fn search_kazanim(keyword: &str) -> Vec<SubtopicEntry> {
    let needle = fold_case(keyword);
    all_subtopics()
        .into_iter()
        .filter(|entry| fold_case(entry.subtopic.kazanim).contains(&needle))
        .collect()
}

// `İ` lowercases to `i` + U+0307; drop the combining dot so "iskelet" finds "İskelet".
fn fold_case(text: &str) -> String {
    text.to_lowercase().replace('\u{307}', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn every_topic_has_subtopics() {
        assert!(!all_topics().is_empty());
        for t in all_topics() {
            let found = topic(t.id).expect("listed topic resolves");
            assert!(!found.subtopics.is_empty(), "{} has no subtopics", t.id);
            assert_eq!(found.subtopic_count(), found.subtopics.len());
        }
    }

    #[test]
    fn topic_ids_are_unique_and_subtopic_ids_unique_within_topic() {
        let ids: HashSet<_> = all_topics().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all_topics().len());
        for t in all_topics() {
            let sub_ids: HashSet<_> = t.subtopics.iter().map(|s| s.id).collect();
            assert_eq!(sub_ids.len(), t.subtopics.len(), "duplicate subtopic in {}", t.id);
        }
    }

    #[test]
    fn unknown_topic_is_not_found() {
        assert!(topic("uzay-korsanlari").is_none());
        assert!(subtopics("uzay-korsanlari").is_none());
        assert!(subtopic("vucudumuz", "yok-boyle-bir-konu").is_none());
    }

    #[test]
    fn subtopic_lookup_by_pair() {
        let kalp = subtopic("vucudumuz", "kalp").expect("kalp exists");
        assert_eq!(kalp.name, "Kalbim nasıl çalışır?");
    }

    #[test]
    fn flattened_list_covers_every_subtopic() {
        let expected: usize = all_topics().iter().map(|t| t.subtopics.len()).sum();
        assert_eq!(all_subtopics().len(), expected);
    }

    #[rstest]
    #[case("önemini")]
    #[case("ÖNEMİNİ")]
    #[case("iskelet")]
    #[case("Nefes almanın")]
    fn kazanim_search_is_case_insensitive(#[case] keyword: &str) {
        assert!(!search_kazanim(keyword).is_empty(), "no hit for {keyword}");
    }

    #[test]
    fn any_exact_substring_of_a_kazanim_finds_its_subtopic() {
        for entry in all_subtopics() {
            let text = entry.subtopic.kazanim;
            let chars: Vec<char> = text.chars().collect();
            let fragment: String = chars[chars.len() / 4..chars.len() / 2].iter().collect();
            let hits = search_kazanim(&fragment);
            assert!(
                hits.iter().any(|h| h.topic.id == entry.topic.id
                    && h.subtopic.id == entry.subtopic.id),
                "fragment {fragment:?} did not find {}/{}",
                entry.topic.id,
                entry.subtopic.id
            );
        }
    }
}
