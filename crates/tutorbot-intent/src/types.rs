//! Intent data model.

use serde::{Deserialize, Serialize};

/// What the learner is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    AnalogyRequest,
    ExplanationRequest,
    ExampleRequest,
    PracticeRequest,
    #[default]
    General,
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnalogyRequest => write!(f, "analogy_request"),
            Self::ExplanationRequest => write!(f, "explanation_request"),
            Self::ExampleRequest => write!(f, "example_request"),
            Self::PracticeRequest => write!(f, "practice_request"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Academic subject a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Physics,
    Chemistry,
    ComputerScience,
    Math,
    #[default]
    General,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Physics => write!(f, "physics"),
            Self::Chemistry => write!(f, "chemistry"),
            Self::ComputerScience => write!(f, "computer_science"),
            Self::Math => write!(f, "math"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Grade band the answer should be pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Elementary,
    MiddleSchool,
    #[default]
    HighSchool,
    Advanced,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elementary => write!(f, "elementary"),
            Self::MiddleSchool => write!(f, "middle_school"),
            Self::HighSchool => write!(f, "high_school"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Presentation requested on top of the intent type (memory aids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Plain,
    /// Rap, song, rhyme or poem.
    Rap,
    Story,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Rap => write!(f, "rap"),
            Self::Story => write!(f, "story"),
        }
    }
}

/// Structured classification of a single user message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    pub subject: Subject,
    /// Canonical topic, the `general help` sentinel, or the trimmed message itself.
    pub topic: String,
    pub level: Level,
    /// False when `level` is the default rather than something the user asked for.
    #[serde(default)]
    pub level_stated: bool,
    #[serde(default)]
    pub format: ResponseFormat,
    /// Original user text, untouched.
    pub raw_request: String,
}
