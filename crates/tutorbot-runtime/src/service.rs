//! TutorService: classify, resolve, generate, remember.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tutorbot_context::{resolve, ConversationContext, Resolution, SessionStore};
use tutorbot_core::{Error, Result, TutorConfig};
use tutorbot_intent::classify;
use tutorbot_respond::{Dispatcher, ResponseLibrary};

use crate::backend::{extract_response, format_prompt, GenerationBackend, NoopBackend};
use crate::types::{ReplySource, ServiceStatus, TutorReply};

/// The tutoring pipeline plus per-session conversation state.
pub struct TutorService {
    config: TutorConfig,
    dispatcher: Dispatcher,
    sessions: SessionStore,
    backend: Arc<dyn GenerationBackend>,
}

impl TutorService {
    /// Build a template-only service from configuration.
    pub fn new(config: TutorConfig) -> Result<Self> {
        let library = ResponseLibrary::from_config(&config)?;
        Ok(Self::with_parts(config, library, Arc::new(NoopBackend)))
    }

    /// Build from explicit parts.
    pub fn with_parts(
        config: TutorConfig,
        library: ResponseLibrary,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        info!(
            "Tutor service initialized: entries={}, backend={}, available={}",
            library.len(),
            backend.name(),
            backend.is_available()
        );
        Self {
            sessions: SessionStore::from_config(&config),
            dispatcher: Dispatcher::new(Arc::new(library)),
            config,
            backend,
        }
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Start a new conversation and return its session id.
    pub fn create_session(&self) -> String {
        self.sessions.create_session()
    }

    /// Answer one message against a caller-owned context, then record the
    /// exchange in it. Never fails.
    pub fn get_response(&self, message: &str, context: &mut ConversationContext) -> TutorReply {
        let intent = classify(message);
        let resolution = resolve(message, intent, context);
        let reply = self.generate(message, &resolution);
        context.record(&resolution);
        reply
    }

    /// Validate `message` and answer it within session `session_id`,
    /// creating the session if needed.
    pub fn respond(&self, session_id: &str, message: &str) -> Result<TutorReply> {
        let message = self.validate(message)?;
        let session = self.sessions.session(session_id);
        let mut context = session.lock();
        Ok(self.get_response(message, &mut context))
    }

    /// Trim and bound-check an incoming message.
    pub fn validate<'a>(&self, message: &'a str) -> Result<&'a str> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::InvalidMessage("message is empty".into()));
        }
        let chars = message.chars().count();
        if chars > self.config.max_message_chars {
            return Err(Error::InvalidMessage(format!(
                "message is {} characters, limit is {}",
                chars, self.config.max_message_chars
            )));
        }
        Ok(message)
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            sessions: self.sessions.len(),
            max_sessions: self.config.max_sessions,
            history_limit: self.config.history_limit,
            library_entries: self.dispatcher.library().len(),
            backend: self.backend.name().to_string(),
            backend_available: self.backend.is_available(),
        }
    }

    fn generate(&self, message: &str, resolution: &Resolution) -> TutorReply {
        let intent = &resolution.intent;

        if self.backend.is_available() {
            let prompt = format_prompt(message, resolution);
            match self.backend.generate(&prompt) {
                Ok(raw) => {
                    let text = extract_response(&raw);
                    if !text.is_empty() {
                        debug!("Model reply for topic {:?}", intent.topic);
                        return TutorReply {
                            text,
                            intent: intent.clone(),
                            strategy: self.dispatcher.route(intent),
                            is_fallback: false,
                            carried_over: resolution.carried_over,
                            source: ReplySource::Model,
                        };
                    }
                    warn!("Backend {} returned an empty reply", self.backend.name());
                }
                Err(e) => warn!("Backend {} failed: {}", self.backend.name(), e),
            }
        }

        let reply = self.dispatcher.dispatch(intent);
        TutorReply {
            text: reply.text,
            intent: intent.clone(),
            strategy: reply.strategy,
            is_fallback: reply.is_fallback,
            carried_over: resolution.carried_over,
            source: ReplySource::Template,
        }
    }
}
