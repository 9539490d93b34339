//! Intent classification: subject, level, request type and format.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::keywords::KeywordSet;
use crate::topics::extract_topic;
use crate::types::{Intent, IntentType, Level, ResponseFormat, Subject};

/// Subject keyword sets, checked in order; the first hit wins.
static SUBJECTS: Lazy<Vec<(Subject, KeywordSet)>> = Lazy::new(|| {
    vec![
        (
            Subject::Physics,
            KeywordSet::new(
                "physics",
                &[
                    "physics", "force", "forces", "motion", "newton", "velocity", "speed",
                    "acceleration", "energy", "vector", "vectors", "projectile", "kinematics",
                    "momentum", "gravity", "free fall", "friction", "power",
                ],
            ),
        ),
        (
            Subject::Chemistry,
            KeywordSet::new(
                "chemistry",
                &[
                    "chemistry", "chemical", "reaction", "reactions", "equilibrium", "molecule",
                    "molecules", "atom", "atoms", "atomic", "bond", "bonds", "bonding",
                ],
            ),
        ),
        (
            Subject::ComputerScience,
            KeywordSet::new(
                "computer_science",
                &[
                    "programming", "code", "coding", "java", "python", "algorithm",
                    "algorithms", "class", "classes", "oop", "object-oriented",
                    "object oriented",
                ],
            ),
        ),
        (
            Subject::Math,
            KeywordSet::new(
                "math",
                &[
                    "math", "maths", "mathematics", "equation", "equations", "algebra",
                    "geometry", "calculus", "calculate", "trigonometry",
                ],
            ),
        ),
    ]
});

/// Grade-band keyword sets, checked in order.
static LEVELS: Lazy<Vec<(Level, KeywordSet)>> = Lazy::new(|| {
    vec![
        (
            Level::MiddleSchool,
            KeywordSet::new(
                "middle_school",
                &[
                    "middle school", "middle schooler", "middle-school", "6th grade",
                    "7th grade", "8th grade", "sixth grade", "seventh grade", "eighth grade",
                    "6th grader", "7th grader", "8th grader",
                ],
            ),
        ),
        (
            Level::Elementary,
            KeywordSet::new(
                "elementary",
                &["elementary", "simple", "simply", "basic", "easy", "kid", "kids", "child"],
            ),
        ),
        (
            Level::Advanced,
            KeywordSet::new(
                "advanced",
                &["ap", "advanced", "college", "university", "in depth", "in-depth", "calculus-based"],
            ),
        ),
        (
            Level::HighSchool,
            KeywordSet::new(
                "high_school",
                &[
                    "high school", "high schooler", "high-school", "9th grade", "10th grade",
                    "11th grade", "12th grade", "9th grader", "10th grader", "11th grader",
                    "12th grader", "ninth grade", "tenth grade",
                ],
            ),
        ),
    ]
});

static ANALOGY: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "analogy",
        &[
            "analogy", "analogies", "metaphor", "similar to", "compare to", "compare it to",
            "is like", "think of it like",
        ],
    )
});

static RAP: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new("rap", &["rap", "song", "rhyme", "rhymes", "poem", "jingle"]));

static STORY: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new("story", &["story", "stories", "tale", "short story"]));

static EXAMPLE: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "example",
        &["example", "examples", "show me", "demonstrate", "real world", "real-world", "real life"],
    )
});

static PRACTICE: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "practice",
        &[
            "practice", "problem", "problems", "questions", "quiz", "test", "exercise",
            "exercises", "worksheet",
        ],
    )
});

static EXPLANATION: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(
        "explanation",
        &[
            "explain", "explanation", "what is", "what are", "what's", "how does", "how do",
            "why", "help me understand", "describe", "tell me about", "define", "teach me",
        ],
    )
});

/// Bare topic queries up to this many tokens count as explanation requests.
const BARE_TOPIC_MAX_TOKENS: usize = 3;

/// Classify a user message into a fully populated [`Intent`].
pub fn classify(text: &str) -> Intent {
    let subject_hit = first_hit(SUBJECTS.as_slice(), text);
    let subject = subject_hit.as_ref().map(|h| h.value).unwrap_or_default();

    let level_hit = first_hit(LEVELS.as_slice(), text);
    let stated_level = level_hit.as_ref().map(|h| h.value);

    let format = if RAP.matches(text) {
        ResponseFormat::Rap
    } else if STORY.matches(text) {
        ResponseFormat::Story
    } else {
        ResponseFormat::Plain
    };

    let intent_type = classify_type(text, subject, format);

    let intent = Intent {
        intent_type,
        subject,
        topic: extract_topic(text),
        level: stated_level.unwrap_or_default(),
        level_stated: stated_level.is_some(),
        format,
        raw_request: text.to_string(),
    };

    debug!(
        "Classified {:?}: type={} subject={} topic={:?} level={} format={} matched=[{}{}]",
        text,
        intent.intent_type,
        intent.subject,
        intent.topic,
        intent.level,
        intent.format,
        subject_hit.as_ref().map(KeywordHit::describe).unwrap_or_default(),
        level_hit
            .as_ref()
            .map(|h| format!(" {}", h.describe()))
            .unwrap_or_default(),
    );

    intent
}

/// The keyword that decided a subject or level.
struct KeywordHit<T> {
    value: T,
    set: &'static str,
    keyword: String,
}

impl<T> KeywordHit<T> {
    fn describe(&self) -> String {
        format!("{}:{:?}", self.set, self.keyword)
    }
}

/// First set (in table order) with a keyword in `text`.
fn first_hit<T: Copy>(table: &[(T, KeywordSet)], text: &str) -> Option<KeywordHit<T>> {
    table.iter().find_map(|(value, set)| {
        set.find(text).map(|keyword| KeywordHit {
            value: *value,
            set: set.name(),
            keyword,
        })
    })
}

/// Request type in priority order: analogy (including memory-aid formats),
/// example, practice, explanation, then bare science topics.
fn classify_type(text: &str, subject: Subject, format: ResponseFormat) -> IntentType {
    if ANALOGY.matches(text) || format != ResponseFormat::Plain {
        IntentType::AnalogyRequest
    } else if EXAMPLE.matches(text) {
        IntentType::ExampleRequest
    } else if PRACTICE.matches(text) {
        IntentType::PracticeRequest
    } else if EXPLANATION.matches(text) {
        IntentType::ExplanationRequest
    } else if matches!(subject, Subject::Physics | Subject::Chemistry | Subject::Math)
        && text.split_whitespace().count() <= BARE_TOPIC_MAX_TOKENS
    {
        IntentType::ExplanationRequest
    } else {
        IntentType::General
    }
}
