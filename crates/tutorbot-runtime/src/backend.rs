//! Text-generation backend trait and prompt helpers.
//!
//! The `GenerationBackend` trait abstracts over a fine-tuned model.
//! Implementations:
//! - `NoopBackend`: never available, so the template dispatcher answers everything

use tutorbot_context::Resolution;
use tutorbot_core::{Error, Result};

const INSTRUCTION_MARKER: &str = "### Instruction:";
const RESPONSE_MARKER: &str = "### Response:";

/// Trait for text-generation backends.
pub trait GenerationBackend: Send + Sync {
    /// Generate a completion for a fully formatted prompt.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is available (model loaded).
    fn is_available(&self) -> bool;

    /// Short name for logs and status output.
    fn name(&self) -> &str {
        "model"
    }
}

/// Placeholder backend (template-only mode).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl GenerationBackend for NoopBackend {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::Backend("no generation backend configured".into()))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Build the instruction prompt for a message.
///
/// When the topic came from conversation context the model would not see it
/// in the message itself, so it is appended to the instruction.
pub fn format_prompt(message: &str, resolution: &Resolution) -> String {
    let mut instruction = message.trim().to_string();
    if resolution.carried_over {
        instruction.push_str("\nTopic: ");
        instruction.push_str(&resolution.intent.topic);
    }
    format!("{INSTRUCTION_MARKER}\n{instruction}\n\n{RESPONSE_MARKER}\n")
}

/// Pull the answer out of raw model output: the text after the last response
/// marker, or the whole output if the model did not echo the prompt.
pub fn extract_response(raw: &str) -> String {
    let answer = match raw.rfind(RESPONSE_MARKER) {
        Some(idx) => &raw[idx + RESPONSE_MARKER.len()..],
        None => raw,
    };
    answer.trim().to_string()
}
