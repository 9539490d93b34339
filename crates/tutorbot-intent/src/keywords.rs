//! Word-boundary keyword matching.
//!
//! Each `KeywordSet` compiles its phrases into a single case-insensitive
//! alternation anchored on word boundaries, so short keywords such as `ap`
//! or `rap` never fire inside longer words ("map", "graph").

use regex::Regex;

/// A named set of keywords/phrases matched on word boundaries.
pub struct KeywordSet {
    name: &'static str,
    pattern: Regex,
}

impl KeywordSet {
    /// Compile a keyword set. Phrases are escaped before joining.
    pub fn new(name: &'static str, phrases: &[&str]) -> Self {
        let alternation = phrases
            .iter()
            .map(|p| regex::escape(&p.to_lowercase()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
            .expect("escaped keyword alternation is a valid regex");
        Self { name, pattern }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if any phrase occurs in `text` as whole words.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The first phrase found in `text`, lowercased.
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern.find(text).map(|m| m.as_str().to_lowercase())
    }
}

impl std::fmt::Debug for KeywordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordSet").field("name", &self.name).finish()
    }
}

/// Lowercased alphanumeric tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let set = KeywordSet::new("level", &["ap", "college"]);
        assert!(set.matches("explain it at an AP level"));
        assert!(!set.matches("show me a map of the chapter"));
        assert!(set.matches("College physics"));
    }

    #[test]
    fn test_multi_word_phrase() {
        let set = KeywordSet::new("explain", &["what is", "help me understand"]);
        assert_eq!(set.find("So, WHAT IS momentum?").as_deref(), Some("what is"));
        assert!(!set.matches("whatis momentum"));
    }

    #[test]
    fn test_possessive_counts_as_word() {
        let set = KeywordSet::new("physics", &["newton"]);
        assert!(set.matches("Newton's laws"));
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Speed vs velocity? explain!"),
            vec!["speed", "vs", "velocity", "explain"]
        );
        assert!(tokenize("  ?! ").is_empty());
    }
}
