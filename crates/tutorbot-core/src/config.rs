//! Configuration loaded from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default number of exchanges kept per conversation.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;
/// Default number of concurrent sessions kept in memory.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
/// Default upper bound on incoming message length (characters).
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;

/// Top-level Tutorbot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Exchanges retained in each conversation history (oldest evicted first).
    pub history_limit: usize,
    /// Session store capacity; the least recently active session is evicted when full.
    pub max_sessions: usize,
    /// Messages longer than this are rejected at the service boundary.
    pub max_message_chars: usize,
    /// External response library replacing the built-in one.
    pub responses_path: Option<PathBuf>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            responses_path: None,
        }
    }
}

impl TutorConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let history_limit = parse_usize(&lookup, "TUTOR_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        let max_sessions = parse_usize(&lookup, "TUTOR_MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?;
        let max_message_chars =
            parse_usize(&lookup, "TUTOR_MAX_MESSAGE_CHARS", DEFAULT_MAX_MESSAGE_CHARS)?;

        if history_limit == 0 {
            return Err(Error::Config("TUTOR_HISTORY_LIMIT must be at least 1".into()));
        }
        if max_sessions == 0 {
            return Err(Error::Config("TUTOR_MAX_SESSIONS must be at least 1".into()));
        }
        if max_message_chars == 0 {
            return Err(Error::Config("TUTOR_MAX_MESSAGE_CHARS must be at least 1".into()));
        }

        let responses_path = lookup("TUTOR_RESPONSES")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let config = Self {
            history_limit,
            max_sessions,
            max_message_chars,
            responses_path,
        };
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

fn parse_usize<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a positive integer, got {:?}", key, raw))),
        None => Ok(default),
    }
}
