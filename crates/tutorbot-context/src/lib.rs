//! Conversation state for the tutor pipeline.
//!
//! A `ConversationContext` remembers the last substantive topic and a
//! bounded history of exchanges. The follow-up resolver uses it to answer
//! context-dependent messages ("give me an analogy", "any rap to remember"),
//! and the `SessionStore` keeps one context per session id.

pub mod context;
pub mod followup;
pub mod sessions;

pub use context::{ConversationContext, Exchange};
pub use followup::{is_follow_up, resolve, Resolution};
pub use sessions::{SessionHandle, SessionStore};
