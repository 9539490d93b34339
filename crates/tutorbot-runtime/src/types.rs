//! Runtime types.

use serde::Serialize;
use tutorbot_intent::Intent;
use tutorbot_respond::Strategy;

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Template,
    Model,
}

/// A reply plus how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct TutorReply {
    pub text: String,
    /// The intent after follow-up resolution.
    pub intent: Intent,
    pub strategy: Strategy,
    #[serde(rename = "isFallback")]
    pub is_fallback: bool,
    /// The topic was taken from conversation context.
    #[serde(rename = "carriedOver")]
    pub carried_over: bool,
    pub source: ReplySource,
}

/// Service status information.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub sessions: usize,
    #[serde(rename = "maxSessions")]
    pub max_sessions: usize,
    #[serde(rename = "historyLimit")]
    pub history_limit: usize,
    #[serde(rename = "libraryEntries")]
    pub library_entries: usize,
    pub backend: String,
    #[serde(rename = "backendAvailable")]
    pub backend_available: bool,
}
