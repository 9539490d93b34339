//! Response types.

use serde::{Deserialize, Serialize};
use tutorbot_intent::IntentType;

/// Response-generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Analogy,
    Explanation,
    Example,
    Practice,
    General,
}

impl Strategy {
    /// The strategy an intent type maps to before any rerouting.
    pub fn for_intent_type(intent_type: IntentType) -> Self {
        match intent_type {
            IntentType::AnalogyRequest => Self::Analogy,
            IntentType::ExplanationRequest => Self::Explanation,
            IntentType::ExampleRequest => Self::Example,
            IntentType::PracticeRequest => Self::Practice,
            IntentType::General => Self::General,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analogy => write!(f, "analogy"),
            Self::Explanation => write!(f, "explanation"),
            Self::Example => write!(f, "example"),
            Self::Practice => write!(f, "practice"),
            Self::General => write!(f, "general"),
        }
    }
}

/// A dispatched answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub strategy: Strategy,
    /// True when no specific entry matched and a generic template was used.
    #[serde(rename = "isFallback")]
    pub is_fallback: bool,
}
