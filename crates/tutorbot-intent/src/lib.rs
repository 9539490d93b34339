//! Tutorbot Intent: maps free-text tutoring requests to structured intents.
//!
//! The topic extractor resolves a canonical topic from a prioritized rule
//! table (compound topics before their single-word components). The
//! classifier layers subject, grade level, request type and response format
//! on top using word-boundary keyword sets.

pub mod classify;
pub mod keywords;
pub mod topics;
pub mod types;

pub use classify::classify;
pub use keywords::{tokenize, KeywordSet};
pub use topics::{
    extract_topic, is_generic_topic, is_known_topic, known_topics, match_topic, GENERAL_HELP,
};
pub use types::*;
