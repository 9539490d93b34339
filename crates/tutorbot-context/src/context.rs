//! Per-conversation memory: last topic and a bounded exchange history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tutorbot_core::config::DEFAULT_HISTORY_LIMIT;
use tutorbot_intent::{IntentType, Level, Subject};

use crate::followup::Resolution;

/// One recorded message and how it was understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub message: String,
    pub intent_type: IntentType,
    pub topic: String,
    pub at: DateTime<Utc>,
}

/// Conversation state owned by the caller and passed into every pipeline call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    last_topic: Option<String>,
    last_subject: Option<Subject>,
    last_level: Option<Level>,
    history: VecDeque<Exchange>,
    history_limit: usize,
}

impl ConversationContext {
    /// Empty context with the default history bound.
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Empty context keeping at most `limit` exchanges (minimum 1).
    pub fn with_history_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            last_topic: None,
            last_subject: None,
            last_level: None,
            history: VecDeque::with_capacity(limit + 1),
            history_limit: limit,
        }
    }

    pub fn last_topic(&self) -> Option<&str> {
        self.last_topic.as_deref()
    }

    pub fn last_subject(&self) -> Option<Subject> {
        self.last_subject
    }

    /// Level of the last substantive exchange, if the user stated one.
    pub fn last_level(&self) -> Option<Level> {
        self.last_level
    }

    /// Recorded exchanges, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Exchange> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Seed the active topic directly (session restore, tests).
    pub fn set_topic(&mut self, topic: impl Into<String>, subject: Subject) {
        self.last_topic = Some(topic.into());
        self.last_subject = Some(subject);
    }

    /// Record a dispatched exchange.
    ///
    /// The active topic is replaced only when the resolution names a
    /// substantive topic; every exchange lands in the history, evicting the
    /// oldest once the bound is exceeded.
    pub fn record(&mut self, resolution: &Resolution) {
        let intent = &resolution.intent;

        if resolution.remembers_topic() {
            self.last_topic = Some(intent.topic.clone());
            self.last_subject = Some(intent.subject);
            self.last_level = if intent.level_stated {
                Some(intent.level)
            } else if resolution.carried_over {
                self.last_level
            } else {
                None
            };
        }

        self.history.push_back(Exchange {
            message: intent.raw_request.clone(),
            intent_type: intent.intent_type,
            topic: intent.topic.clone(),
            at: Utc::now(),
        });
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        debug!(
            "Context updated: last_topic={:?} history={}",
            self.last_topic,
            self.history.len()
        );
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.last_topic = None;
        self.last_subject = None;
        self.last_level = None;
        self.history.clear();
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}
