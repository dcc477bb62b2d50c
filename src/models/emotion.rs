use serde::Serialize;

/// Built-in emotion → keyword table, in the order emotions are offered to users
const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("happy", &["feel-good", "humor", "optimistic", "uplifting"]),
    ("sad", &["melancholy", "tragic", "loss", "heartbreak"]),
    ("adventurous", &["adventure", "thriller", "action"]),
    ("romantic", &["romance", "love story", "romantic"]),
    ("scared", &["horror", "thriller", "ghost"]),
    ("curious", &["nonfiction", "science", "history", "mystery"]),
    ("calm", &["meditation", "mindfulness", "poetry"]),
];

/// One emotion label with the search keywords it expands to
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmotionKeywords {
    pub emotion: String,
    pub keywords: Vec<String>,
}

/// Immutable mapping from emotion label to search keywords
///
/// Built once at startup and shared read-only. Labels are stored lowercase and
/// looked up case-insensitively. The labels offered in the search form come from
/// [`EmotionKeywordMap::emotions`], so every offered emotion has an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionKeywordMap {
    entries: Vec<EmotionKeywords>,
}

impl Default for EmotionKeywordMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EmotionKeywordMap {
    /// The table shipped with the binary
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_KEYWORDS.iter().map(|(emotion, keywords)| {
            (
                emotion.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        }))
    }

    /// Builds a map from arbitrary entries. Later duplicates of a label are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut map = Self {
            entries: Vec::new(),
        };

        for (emotion, keywords) in entries {
            let emotion = emotion.trim().to_lowercase();
            if emotion.is_empty() || map.lookup(&emotion).is_some() {
                continue;
            }
            map.entries.push(EmotionKeywords { emotion, keywords });
        }

        map
    }

    /// Keywords mapped to an emotion label, if the label is known
    pub fn lookup(&self, emotion: &str) -> Option<&[String]> {
        let needle = emotion.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.emotion == needle)
            .map(|entry| entry.keywords.as_slice())
    }

    /// Emotion labels in display order
    pub fn emotions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.emotion.as_str())
    }

    pub fn entries(&self) -> &[EmotionKeywords] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_all_emotions() {
        let map = EmotionKeywordMap::builtin();
        let emotions: Vec<&str> = map.emotions().collect();
        assert_eq!(
            emotions,
            vec!["happy", "sad", "adventurous", "romantic", "scared", "curious", "calm"]
        );
    }

    #[test]
    fn test_every_offered_emotion_has_keywords() {
        let map = EmotionKeywordMap::builtin();
        for emotion in map.emotions() {
            let keywords = map.lookup(emotion).unwrap();
            assert!(!keywords.is_empty(), "{} has no keywords", emotion);
        }
    }

    #[test]
    fn test_lookup_folds_non_ascii_labels() {
        let map = EmotionKeywordMap::from_entries(vec![(
            "Fröhlich".to_string(),
            vec!["heiter".to_string()],
        )]);
        assert_eq!(map.emotions().collect::<Vec<_>>(), vec!["fröhlich"]);
        assert_eq!(map.lookup("FRÖHLICH"), Some(&["heiter".to_string()][..]));
        assert_eq!(map.lookup("fröhlich"), Some(&["heiter".to_string()][..]));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let map = EmotionKeywordMap::builtin();
        assert_eq!(
            map.lookup("  HaPpY "),
            Some(
                &[
                    "feel-good".to_string(),
                    "humor".to_string(),
                    "optimistic".to_string(),
                    "uplifting".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_lookup_unknown_emotion() {
        let map = EmotionKeywordMap::builtin();
        assert_eq!(map.lookup("nostalgic"), None);
        assert_eq!(map.lookup(""), None);
    }

    #[test]
    fn test_from_entries_skips_duplicates_and_blanks() {
        let map = EmotionKeywordMap::from_entries(vec![
            ("Bored".to_string(), vec!["puzzle".to_string()]),
            ("bored".to_string(), vec!["other".to_string()]),
            ("  ".to_string(), vec!["ignored".to_string()]),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup("bored"), Some(&["puzzle".to_string()][..]));
    }
}
