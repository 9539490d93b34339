//! Response dispatcher: intent to strategy to library entry or fallback.

use std::sync::Arc;

use tracing::debug;
use tutorbot_intent::{is_known_topic, Intent, ResponseFormat, Subject, GENERAL_HELP};

use crate::library::ResponseLibrary;
use crate::types::{Reply, Strategy};

/// Selects and renders a response for a resolved intent. Never fails.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    library: Arc<ResponseLibrary>,
}

impl Dispatcher {
    pub fn new(library: Arc<ResponseLibrary>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ResponseLibrary {
        &self.library
    }

    /// Strategy for an intent. General requests about a science subject or a
    /// recognized topic are answered with an explanation.
    pub fn route(&self, intent: &Intent) -> Strategy {
        match Strategy::for_intent_type(intent.intent_type) {
            Strategy::General => {
                if intent.topic.eq_ignore_ascii_case(GENERAL_HELP) {
                    Strategy::General
                } else if matches!(intent.subject, Subject::Physics | Subject::Chemistry)
                    || is_known_topic(&intent.topic)
                {
                    Strategy::Explanation
                } else {
                    Strategy::General
                }
            }
            other => other,
        }
    }

    /// Produce the reply for `intent`.
    pub fn dispatch(&self, intent: &Intent) -> Reply {
        let strategy = self.route(intent);

        let reply = match self
            .library
            .find(&intent.topic, strategy, intent.level, intent.format)
        {
            Some(entry) => Reply {
                text: entry.text(),
                strategy,
                is_fallback: false,
            },
            None if intent.format != ResponseFormat::Plain => Reply {
                text: self.library.format_fallback(intent.format, &intent.topic),
                strategy,
                is_fallback: true,
            },
            None => Reply {
                text: self.library.fallback(strategy, &intent.topic),
                strategy,
                is_fallback: true,
            },
        };

        debug!(
            "Dispatched topic={:?} strategy={} level={} format={} fallback={}",
            intent.topic, strategy, intent.level, intent.format, reply.is_fallback
        );
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorbot_intent::{classify, known_topics, IntentType, Level};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(ResponseLibrary::builtin().unwrap()))
    }

    fn intent(intent_type: IntentType, topic: &str, level: Level) -> Intent {
        Intent {
            intent_type,
            subject: Subject::Physics,
            topic: topic.to_string(),
            level,
            level_stated: true,
            format: ResponseFormat::Plain,
            raw_request: topic.to_string(),
        }
    }

    #[test]
    fn test_every_library_topic_has_explanation_at_every_level() {
        let d = dispatcher();
        let levels = [
            Level::Elementary,
            Level::MiddleSchool,
            Level::HighSchool,
            Level::Advanced,
        ];
        for topic in d.library().topics() {
            for level in levels {
                let reply = d.dispatch(&intent(IntentType::ExplanationRequest, topic, level));
                assert!(
                    !reply.is_fallback,
                    "no explanation for {topic} at {level}"
                );
                assert_eq!(reply.strategy, Strategy::Explanation);
            }
        }
    }

    #[test]
    fn test_every_extractable_topic_has_an_explanation() {
        let d = dispatcher();
        for topic in known_topics() {
            let reply = d.dispatch(&intent(IntentType::ExplanationRequest, topic, Level::HighSchool));
            assert!(!reply.is_fallback, "no explanation for {topic}");
        }
    }

    #[test]
    fn test_level_specific_analogy() {
        let d = dispatcher();
        let ms = d.dispatch(&intent(IntentType::AnalogyRequest, "Newton's laws", Level::MiddleSchool));
        let hs = d.dispatch(&intent(IntentType::AnalogyRequest, "Newton's laws", Level::HighSchool));
        assert!(!ms.is_fallback);
        assert!(!hs.is_fallback);
        assert_ne!(ms.text, hs.text);
    }

    #[test]
    fn test_speed_velocity_analogy_is_specific() {
        let d = dispatcher();
        let reply = d.dispatch(&classify("speed vs velocity ? explain using analogy"));
        assert_eq!(reply.strategy, Strategy::Analogy);
        assert!(!reply.is_fallback);
        assert!(reply.text.to_lowercase().contains("velocity"));
    }

    #[test]
    fn test_unknown_topic_falls_back() {
        let d = dispatcher();
        let reply = d.dispatch(&classify("Explain photosynthesis in plants"));
        assert!(reply.is_fallback);
        assert_eq!(reply.strategy, Strategy::Explanation);
        assert!(reply.text.contains("Explain photosynthesis in plants"));
    }

    #[test]
    fn test_general_routing() {
        let d = dispatcher();
        // physics subject without an explicit request keyword
        let physics = classify("I have a physics exam on friction next week");
        assert_eq!(d.route(&physics), Strategy::Explanation);

        let chat = classify("tell me a joke");
        assert_eq!(d.route(&chat), Strategy::General);
        assert!(d.dispatch(&chat).is_fallback);
    }

    #[test]
    fn test_general_help_menu() {
        let d = dispatcher();
        for text in ["help", "explain"] {
            let reply = d.dispatch(&classify(text));
            assert!(!reply.is_fallback, "{text}");
            assert!(reply.text.contains("vector addition"));
        }
    }

    #[test]
    fn test_rap_format() {
        let d = dispatcher();
        let mut rap = intent(IntentType::AnalogyRequest, "vector addition", Level::HighSchool);
        rap.format = ResponseFormat::Rap;
        let reply = d.dispatch(&rap);
        assert!(!reply.is_fallback);
        assert!(reply.text.to_lowercase().contains("vector"));

        rap.topic = "photosynthesis".into();
        let reply = d.dispatch(&rap);
        assert!(reply.is_fallback);
        assert!(reply.text.contains("photosynthesis"));
    }

    #[test]
    fn test_compound_topic_has_its_own_content() {
        let d = dispatcher();
        let compound = d.dispatch(&classify("explain vector addition and projectile motion"));
        let single = d.dispatch(&classify("explain vectors"));
        assert!(!compound.is_fallback);
        assert_ne!(compound.text, single.text);
    }
}
