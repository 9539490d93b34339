//! Response library: static teaching content keyed by topic.
//!
//! Format (JSON):
//! ```json
//! {
//!   "entries": [
//!     { "topic": "vector addition", "strategy": "analogy", "level": "middle_school",
//!       "format": "plain", "lines": ["...", "..."] }
//!   ],
//!   "fallbacks": { "analogy": ["... {topic} ..."], "explanation": [...], ... }
//! }
//! ```
//! `strategy`, `level` and `format` are optional; a missing field matches any
//! value (format defaults to plain).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use tutorbot_core::{Error, Result, TutorConfig};
use tutorbot_intent::{Level, ResponseFormat};

use crate::types::Strategy;

const BUILTIN_LIBRARY: &str = include_str!("../assets/responses.json");

/// Placeholder replaced with the topic in fallback templates.
const TOPIC_PLACEHOLDER: &str = "{topic}";

/// One piece of literal content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEntry {
    /// Canonical topic, compared case-insensitively.
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ResponseFormat>,
    pub lines: Vec<String>,
}

impl ResponseEntry {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn format(&self) -> ResponseFormat {
        self.format.unwrap_or_default()
    }
}

/// Templates used when no entry matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fallbacks {
    pub analogy: Vec<String>,
    pub explanation: Vec<String>,
    pub example: Vec<String>,
    pub practice: Vec<String>,
    pub general: Vec<String>,
    pub rap: Vec<String>,
    pub story: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LibraryFile {
    entries: Vec<ResponseEntry>,
    fallbacks: Fallbacks,
}

/// Immutable lookup table of teaching content.
#[derive(Debug, Clone)]
pub struct ResponseLibrary {
    entries: Vec<ResponseEntry>,
    fallbacks: Fallbacks,
}

impl ResponseLibrary {
    /// The library compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LIBRARY)
    }

    /// Load a library from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let library = Self::from_json(&data)?;
        info!(
            "Loaded response library from {} ({} entries)",
            path.display(),
            library.len()
        );
        Ok(library)
    }

    /// The configured library: `responses_path` if set, otherwise the built-in one.
    pub fn from_config(config: &TutorConfig) -> Result<Self> {
        match &config.responses_path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Parse and validate a library document.
    pub fn from_json(data: &str) -> Result<Self> {
        let file: LibraryFile = serde_json::from_str(data)?;
        let library = Self {
            entries: file.entries,
            fallbacks: file.fallbacks,
        };
        library.validate()?;
        Ok(library)
    }

    fn validate(&self) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.topic.trim().is_empty() {
                return Err(Error::Library(format!("entry {} has an empty topic", i)));
            }
            if entry.lines.is_empty() {
                return Err(Error::Library(format!(
                    "entry {} ({}) has no lines",
                    i, entry.topic
                )));
            }
        }

        let f = &self.fallbacks;
        for (name, lines) in [
            ("analogy", &f.analogy),
            ("explanation", &f.explanation),
            ("example", &f.example),
            ("practice", &f.practice),
            ("general", &f.general),
            ("rap", &f.rap),
            ("story", &f.story),
        ] {
            if lines.is_empty() {
                return Err(Error::Library(format!("fallback '{}' is empty", name)));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    /// Distinct topics with at least one entry, in file order.
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !topics.iter().any(|t| t.eq_ignore_ascii_case(&entry.topic)) {
                topics.push(entry.topic.as_str());
            }
        }
        topics
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.topic.eq_ignore_ascii_case(topic.trim()))
    }

    /// The most specific entry for the given key.
    ///
    /// Preference: exact level over level-agnostic, then exact strategy over
    /// strategy-agnostic, then file order.
    pub fn find(
        &self,
        topic: &str,
        strategy: Strategy,
        level: Level,
        format: ResponseFormat,
    ) -> Option<&ResponseEntry> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .filter(|e| e.topic.eq_ignore_ascii_case(topic))
            .filter(|e| e.format() == format)
            .filter(|e| e.strategy.map_or(true, |s| s == strategy))
            .filter(|e| e.level.map_or(true, |l| l == level))
            .min_by_key(|e| {
                let level_rank = u8::from(e.level.is_none()) * 2;
                let strategy_rank = u8::from(e.strategy.is_none());
                level_rank + strategy_rank
            })
    }

    /// Render the fallback template for a strategy.
    pub fn fallback(&self, strategy: Strategy, topic: &str) -> String {
        let lines = match strategy {
            Strategy::Analogy => &self.fallbacks.analogy,
            Strategy::Explanation => &self.fallbacks.explanation,
            Strategy::Example => &self.fallbacks.example,
            Strategy::Practice => &self.fallbacks.practice,
            Strategy::General => &self.fallbacks.general,
        };
        render(lines, topic)
    }

    /// Render the fallback template for a memory-aid format.
    /// Plain has no template of its own and uses the analogy one.
    pub fn format_fallback(&self, format: ResponseFormat, topic: &str) -> String {
        let lines = match format {
            ResponseFormat::Rap => &self.fallbacks.rap,
            ResponseFormat::Story => &self.fallbacks.story,
            ResponseFormat::Plain => &self.fallbacks.analogy,
        };
        render(lines, topic)
    }
}

fn render(lines: &[String], topic: &str) -> String {
    let topic = topic.trim();
    let topic = if topic.is_empty() { "this topic" } else { topic };
    lines.join("\n").replace(TOPIC_PLACEHOLDER, topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL_LIBRARY: &str = r#"{
        "entries": [
            { "topic": "momentum", "strategy": "explanation", "lines": ["p = mv"] },
            { "topic": "momentum", "strategy": "explanation", "level": "middle_school",
              "lines": ["Momentum is how hard something is to stop."] },
            { "topic": "momentum", "lines": ["Anything about momentum."] },
            { "topic": "momentum", "format": "rap", "lines": ["Mass times v, that's the key"] }
        ],
        "fallbacks": {
            "analogy": ["Think of {topic} like this."],
            "explanation": ["Let's explain {topic}."],
            "example": ["Examples of {topic}."],
            "practice": ["Practice {topic}."],
            "general": ["Tell me more about {topic}."],
            "rap": ["A rap about {topic}."],
            "story": ["A story about {topic}."]
        }
    }"#;

    #[test]
    fn test_builtin_library_loads() {
        let library = ResponseLibrary::builtin().unwrap();
        assert!(library.len() > 20);
        assert!(library.has_topic("vector addition"));
        assert!(library.has_topic("general help"));
    }

    #[test]
    fn test_find_prefers_exact_level_then_strategy() {
        let library = ResponseLibrary::from_json(SMALL_LIBRARY).unwrap();

        let ms = library
            .find("Momentum", Strategy::Explanation, Level::MiddleSchool, ResponseFormat::Plain)
            .unwrap();
        assert!(ms.text().contains("hard something is to stop"));

        let hs = library
            .find("momentum", Strategy::Explanation, Level::HighSchool, ResponseFormat::Plain)
            .unwrap();
        assert_eq!(hs.text(), "p = mv");

        let any = library
            .find("momentum", Strategy::Practice, Level::HighSchool, ResponseFormat::Plain)
            .unwrap();
        assert_eq!(any.text(), "Anything about momentum.");
    }

    #[test]
    fn test_find_respects_format() {
        let library = ResponseLibrary::from_json(SMALL_LIBRARY).unwrap();
        let rap = library
            .find("momentum", Strategy::Analogy, Level::HighSchool, ResponseFormat::Rap)
            .unwrap();
        assert!(rap.text().starts_with("Mass times v"));
        assert!(library
            .find("momentum", Strategy::Analogy, Level::HighSchool, ResponseFormat::Story)
            .is_none());
    }

    #[test]
    fn test_find_misses_unknown_topic() {
        let library = ResponseLibrary::from_json(SMALL_LIBRARY).unwrap();
        assert!(library
            .find("photosynthesis", Strategy::Explanation, Level::HighSchool, ResponseFormat::Plain)
            .is_none());
        assert!(library
            .find("  ", Strategy::Explanation, Level::HighSchool, ResponseFormat::Plain)
            .is_none());
    }

    #[test]
    fn test_fallback_rendering() {
        let library = ResponseLibrary::from_json(SMALL_LIBRARY).unwrap();
        assert_eq!(
            library.fallback(Strategy::Analogy, "photosynthesis"),
            "Think of photosynthesis like this."
        );
        assert_eq!(library.fallback(Strategy::General, ""), "Tell me more about this topic.");
        assert_eq!(
            library.format_fallback(ResponseFormat::Story, "gravity"),
            "A story about gravity."
        );
    }

    #[test]
    fn test_validation_errors() {
        let missing_fallback = r#"{ "entries": [], "fallbacks": { "analogy": ["x"] } }"#;
        assert!(matches!(
            ResponseLibrary::from_json(missing_fallback),
            Err(Error::Json(_))
        ));

        let empty_lines = SMALL_LIBRARY.replace(r#"["p = mv"]"#, "[]");
        assert!(matches!(
            ResponseLibrary::from_json(&empty_lines),
            Err(Error::Library(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL_LIBRARY.as_bytes()).unwrap();
        let library = ResponseLibrary::load(file.path()).unwrap();
        assert_eq!(library.len(), 4);
        assert_eq!(library.topics(), vec!["momentum"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ResponseLibrary::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
