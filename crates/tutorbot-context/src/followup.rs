//! Follow-up detection and context carry-over.
//!
//! A message is a follow-up when it asks for something about "the current
//! topic" without naming a recognized topic of its own. Two kinds qualify:
//!
//! 1. referential phrases that point back at the conversation ("explain it",
//!    "tell me more", "about this"). Extra words are allowed, so "can you
//!    explain it with an example from sports" still refers to the old topic;
//! 2. request phrases ("analogy", "what about", "make a rap") and short
//!    requests of at most four words with a request keyword. Here every
//!    content word must be request filler, so "explain photosynthesis" or
//!    "what about photosynthesis?" introduce a new subject instead.
//!
//! Only follow-ups with a remembered topic are rewritten.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::info;
use tutorbot_intent::{
    is_generic_topic, is_known_topic, tokenize, Intent, IntentType, KeywordSet, GENERAL_HELP,
};

use crate::context::ConversationContext;

static REFERENTIAL_PHRASES: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "referential",
        &[
            "explain it", "explain that", "explain this", "explain more", "explain again",
            "tell me more", "more details", "more about it", "about it", "about this",
            "about that", "another one", "same topic", "same thing",
        ],
    )
});

static FOLLOW_UP_PHRASES: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "follow_up",
        &[
            "analogy", "analogies", "example", "examples", "rap", "song", "rhyme", "poem",
            "story", "can you explain", "what about", "how about", "can you help",
            "i need help", "help me understand", "help me remember", "to remember", "simpler",
            "quiz me", "practice",
        ],
    )
});

static REQUEST_KEYWORDS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "request",
        &["analogy", "analogies", "example", "examples", "explain", "help"],
    )
});

/// Words that carry no topic of their own in a follow-up request.
const FILLER_WORDS: &[&str] = &[
    // function words
    "an", "any", "the", "me", "my", "you", "your", "us", "we", "it", "this", "that", "these",
    "those", "to", "for", "of", "about", "with", "using", "in", "on", "by", "so", "and", "or",
    "is", "are", "be", "do", "does", "did", "can", "could", "would", "will", "should", "please",
    "pls", "some", "more", "another", "one", "other", "again", "also", "now", "then", "ok",
    "okay", "yes", "sure", "thanks", "thank", "what", "how", "just", "too", "way", "let", "lets",
    "want", "need", "like", "get", "give", "show", "make", "create", "write", "tell", "try",
    "use", "put", "into", "words", "terms", "bit", "little", "really",
    // request words
    "help", "understand", "remember", "memorize", "explain", "explanation", "analogy",
    "analogies", "example", "examples", "rap", "song", "rhyme", "poem", "story", "stories",
    "short", "simple", "simpler", "simply", "easier", "easy", "basic", "better", "quick", "fun",
    "funny", "different", "details", "detail", "practice", "problem", "problems", "question",
    "questions", "quiz", "describe", "teach", "learn", "topic", "concept",
    // level words
    "middle", "school", "schooler", "elementary", "high", "college", "university", "ap",
    "advanced", "depth", "grade", "grader", "graders", "6th", "7th", "8th", "9th", "10th",
    "11th", "12th", "sixth", "seventh", "eighth", "ninth", "tenth", "level", "kid", "kids",
    "child", "beginner",
];

/// Outcome of follow-up resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The intent after any carry-over.
    pub intent: Intent,
    /// The message was judged context-dependent.
    pub follow_up: bool,
    /// The remembered topic was substituted into the intent.
    pub carried_over: bool,
}

impl Resolution {
    /// Whether recording this exchange should replace the active topic.
    ///
    /// Generic sentinels never do, and neither does a follow-up that found
    /// nothing to carry over (its "topic" is just the request text).
    pub fn remembers_topic(&self) -> bool {
        if is_generic_topic(&self.intent.topic) {
            return false;
        }
        !(self.follow_up && !self.carried_over)
    }
}

/// Decide whether `text` depends on previously established context.
pub fn is_follow_up(text: &str, intent: &Intent) -> bool {
    if is_known_topic(&intent.topic) {
        return false;
    }
    if REFERENTIAL_PHRASES.matches(text) {
        return true;
    }
    if !only_filler(text) {
        return false;
    }

    if FOLLOW_UP_PHRASES.matches(text) {
        return true;
    }

    let trimmed = text.trim();
    text.split_whitespace().count() <= 4
        && REQUEST_KEYWORDS.matches(text)
        && (intent.topic == trimmed || intent.topic == GENERAL_HELP)
}

/// Resolve `intent` against `context`, substituting the remembered topic for
/// follow-ups. The context itself is not modified.
pub fn resolve(text: &str, mut intent: Intent, context: &ConversationContext) -> Resolution {
    let follow_up = is_follow_up(text, &intent);
    let mut carried_over = false;

    if follow_up {
        if let Some(topic) = context.last_topic() {
            intent.topic = topic.to_string();
            if let Some(subject) = context.last_subject() {
                intent.subject = subject;
            }
            if !intent.level_stated {
                if let Some(level) = context.last_level() {
                    intent.level = level;
                }
            }
            // "tell me more" about a known topic is a request to explain it
            if intent.intent_type == IntentType::General {
                intent.intent_type = IntentType::ExplanationRequest;
            }
            carried_over = true;
            info!("Using context topic: {}", intent.topic);
        }
    }

    Resolution {
        intent,
        follow_up,
        carried_over,
    }
}

fn only_filler(text: &str) -> bool {
    tokenize(text)
        .iter()
        .filter(|t| t.chars().count() > 1)
        .all(|t| FILLER_WORDS.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorbot_intent::{classify, Level, ResponseFormat, Subject};

    fn context_with(topic: &str, subject: Subject) -> ConversationContext {
        let mut ctx = ConversationContext::new();
        ctx.set_topic(topic, subject);
        ctx
    }

    fn run(text: &str, ctx: &ConversationContext) -> Resolution {
        resolve(text, classify(text), ctx)
    }

    #[test]
    fn test_analogy_follow_up_carries_topic() {
        let ctx = context_with("vector addition", Subject::Physics);
        let res = run("give me any analogy to understand", &ctx);
        assert!(res.follow_up);
        assert!(res.carried_over);
        assert_eq!(res.intent.topic, "vector addition");
        assert_eq!(res.intent.subject, Subject::Physics);
        assert_eq!(res.intent.intent_type, IntentType::AnalogyRequest);
    }

    #[test]
    fn test_new_topic_is_not_overridden() {
        let ctx = context_with("vector addition", Subject::Physics);
        let res = run("What are Newton's laws?", &ctx);
        assert!(!res.follow_up);
        assert!(!res.carried_over);
        assert_eq!(res.intent.topic, "Newton's laws");
    }

    #[test]
    fn test_unrecognized_new_subject_is_not_overridden() {
        let ctx = context_with("vector addition", Subject::Physics);
        for text in [
            "explain photosynthesis",
            "give me an example of photosynthesis",
            "can you explain photosynthesis",
            "what about photosynthesis?",
        ] {
            let res = run(text, &ctx);
            assert!(!res.follow_up, "{text} should not be a follow-up");
            assert_ne!(res.intent.topic, "vector addition");
        }
    }

    #[test]
    fn test_referential_phrase_with_extra_words() {
        let ctx = context_with("vector addition", Subject::Physics);
        let res = run("can you explain it with an example from sports", &ctx);
        assert!(res.follow_up);
        assert!(res.carried_over);
        assert_eq!(res.intent.topic, "vector addition");
        assert_eq!(res.intent.intent_type, IntentType::ExampleRequest);
        assert!(res.remembers_topic());
    }

    #[test]
    fn test_referential_phrase_does_not_override_known_topic() {
        let ctx = context_with("vector addition", Subject::Physics);
        let res = run("tell me more about momentum", &ctx);
        assert!(!res.follow_up);
        assert_eq!(res.intent.topic, "momentum");
    }

    #[test]
    fn test_grade_phrased_follow_up() {
        let ctx = context_with("vector addition", Subject::Physics);
        let res = run("what about for a 9th grader?", &ctx);
        assert!(res.follow_up);
        assert!(res.carried_over);
        assert_eq!(res.intent.topic, "vector addition");
        assert_eq!(res.intent.level, Level::HighSchool);
        assert_eq!(res.intent.intent_type, IntentType::ExplanationRequest);
    }

    #[test]
    fn test_filler_words_are_unique() {
        for (i, word) in FILLER_WORDS.iter().enumerate() {
            assert!(!FILLER_WORDS[i + 1..].contains(word), "duplicate filler word {word}");
        }
    }

    #[test]
    fn test_rap_and_story_follow_ups() {
        let ctx = context_with("vector addition", Subject::Physics);

        let rap = run("any rap to remember", &ctx);
        assert!(rap.carried_over);
        assert_eq!(rap.intent.topic, "vector addition");
        assert_eq!(rap.intent.format, ResponseFormat::Rap);

        let story = run("Create a story about this", &ctx);
        assert!(story.carried_over);
        assert_eq!(story.intent.format, ResponseFormat::Story);
    }

    #[test]
    fn test_short_request_heuristic() {
        let ctx = context_with("momentum", Subject::Physics);
        let res = run("explain", &ctx);
        assert!(res.follow_up);
        assert_eq!(res.intent.topic, "momentum");

        let res = run("help please", &ctx);
        assert!(res.follow_up);
    }

    #[test]
    fn test_tell_me_more_becomes_explanation() {
        let ctx = context_with("chemical equilibrium", Subject::Chemistry);
        let res = run("tell me more", &ctx);
        assert!(res.carried_over);
        assert_eq!(res.intent.intent_type, IntentType::ExplanationRequest);
        assert_eq!(res.intent.subject, Subject::Chemistry);
    }

    #[test]
    fn test_follow_up_without_context_is_unchanged() {
        let ctx = ConversationContext::new();
        let res = run("give me an analogy", &ctx);
        assert!(res.follow_up);
        assert!(!res.carried_over);
        assert_eq!(res.intent.topic, "give me an analogy");
        assert!(!res.remembers_topic());
    }

    #[test]
    fn test_level_carried_unless_restated() {
        let mut ctx = ConversationContext::new();
        let first = run("Explain Newton's laws for middle school", &ctx);
        ctx.record(&first);

        let res = run("give me an analogy", &ctx);
        assert_eq!(res.intent.level, Level::MiddleSchool);

        let res = run("give me an analogy for college", &ctx);
        assert_eq!(res.intent.level, Level::Advanced);
    }

    #[test]
    fn test_remembers_topic() {
        let plain = Resolution {
            intent: classify("Explain vector addition"),
            follow_up: false,
            carried_over: false,
        };
        assert!(plain.remembers_topic());

        let help = Resolution {
            intent: classify("help"),
            follow_up: true,
            carried_over: false,
        };
        assert!(!help.remembers_topic());
    }
}
