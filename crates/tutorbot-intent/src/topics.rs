//! Topic extraction from a prioritized rule table.
//!
//! Rules are evaluated top to bottom and the first match wins. Compound
//! topics sit above the single-word rules they are built from, so
//! "vector addition with projectiles" never collapses to plain "vectors".

use crate::keywords::tokenize;

/// Sentinel topic for bare control words ("help", "explain", ...).
pub const GENERAL_HELP: &str = "general help";

/// Messages consisting only of one of these words carry no topic.
const CONTROL_WORDS: &[&str] = &["explain", "help", "teach", "learn", "understand"];

/// Topic values that never count as a real subject of conversation.
const GENERIC_TOPICS: &[&str] = &[GENERAL_HELP, "explain"];

/// One row of the topic rule table.
///
/// A rule matches when every `all` substring is present, and at least one
/// `any` substring or `any_word` token is present (when either list is
/// non-empty). Substring tests run on the lowercased message; `any_word`
/// compares whole tokens for keywords that are too short to test as
/// substrings.
struct TopicRule {
    topic: &'static str,
    all: &'static [&'static str],
    any: &'static [&'static str],
    any_word: &'static [&'static str],
}

impl TopicRule {
    fn matches(&self, lower: &str, tokens: &[String]) -> bool {
        if !self.all.iter().all(|kw| lower.contains(kw)) {
            return false;
        }
        if self.any.is_empty() && self.any_word.is_empty() {
            return true;
        }
        self.any.iter().any(|kw| lower.contains(kw))
            || self
                .any_word
                .iter()
                .any(|w| tokens.iter().any(|t| t == w))
    }
}

const fn rule(
    topic: &'static str,
    all: &'static [&'static str],
    any: &'static [&'static str],
) -> TopicRule {
    TopicRule {
        topic,
        all,
        any,
        any_word: &[],
    }
}

static TOPIC_RULES: &[TopicRule] = &[
    // Compound topics
    rule(
        "vector motion and projectile motion",
        &["vector"],
        &["projectile", "free fall", "free-fall"],
    ),
    rule("speed vs velocity", &["speed", "velocity"], &[]),
    rule("work power energy", &["work", "power", "energy"], &[]),
    // Multi-word physics topics
    rule("projectile motion", &[], &["projectile"]),
    rule("free fall", &[], &["free fall", "free-fall", "freefall"]),
    rule(
        "vector addition",
        &[],
        &[
            "vector addition",
            "adding vectors",
            "add vectors",
            "vector sum",
            "resultant vector",
        ],
    ),
    TopicRule {
        topic: "object-oriented programming",
        all: &[],
        any: &["object-oriented", "object oriented"],
        any_word: &["oop"],
    },
    // Single-word physics topics
    rule("Newton's laws", &[], &["newton"]),
    rule("forces", &[], &["force"]),
    rule("momentum", &[], &["momentum"]),
    rule("acceleration", &[], &["acceleration", "accelerate"]),
    rule("velocity", &[], &["velocity", "velocities"]),
    rule("speed", &[], &["speed"]),
    rule("energy", &[], &["energy"]),
    rule("vectors", &[], &["vector"]),
    rule("kinematics", &[], &["kinematic"]),
    rule("dynamics", &[], &["dynamics"]),
    rule("motion", &[], &["motion"]),
    // Chemistry
    rule("chemical equilibrium", &[], &["equilibrium", "le chatelier"]),
    rule("chemical reactions", &[], &["reaction"]),
    rule("chemical bonding", &[], &["bond"]),
    rule("molecules", &[], &["molecule", "molecular"]),
    TopicRule {
        topic: "atomic structure",
        all: &[],
        any: &["atomic"],
        any_word: &["atom", "atoms"],
    },
];

/// Extract the canonical topic of `text`.
///
/// Returns the first matching rule's topic, [`GENERAL_HELP`] for a bare
/// control word, or otherwise the trimmed input unchanged.
pub fn extract_topic(text: &str) -> String {
    if let Some(topic) = match_topic(text) {
        return topic.to_string();
    }

    let trimmed = text.trim();
    let bare = trimmed
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    if CONTROL_WORDS.contains(&bare.as_str()) {
        return GENERAL_HELP.to_string();
    }

    trimmed.to_string()
}

/// The canonical topic named by `text`, if any rule matches.
pub fn match_topic(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);
    TOPIC_RULES
        .iter()
        .find(|r| r.matches(&lower, &tokens))
        .map(|r| r.topic)
}

/// True if `topic` is one of the canonical topics in the rule table.
pub fn is_known_topic(topic: &str) -> bool {
    TOPIC_RULES
        .iter()
        .any(|r| r.topic.eq_ignore_ascii_case(topic.trim()))
}

/// All canonical topics, in rule priority order.
pub fn known_topics() -> impl Iterator<Item = &'static str> {
    TOPIC_RULES.iter().map(|r| r.topic)
}

/// True for empty topics and the generic sentinels.
pub fn is_generic_topic(topic: &str) -> bool {
    let topic = topic.trim();
    topic.is_empty() || GENERIC_TOPICS.iter().any(|g| g.eq_ignore_ascii_case(topic))
}
