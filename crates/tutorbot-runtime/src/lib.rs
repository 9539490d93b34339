//! Tutorbot Runtime: the request pipeline.
//!
//! `TutorService::get_response` runs one message through intent
//! classification, follow-up resolution, response generation and context
//! update. A `GenerationBackend` may answer first; the template dispatcher
//! is always there to fall back on.

pub mod backend;
pub mod service;
pub mod types;

pub use backend::{extract_response, format_prompt, GenerationBackend, NoopBackend};
pub use service::TutorService;
pub use types::{ReplySource, ServiceStatus, TutorReply};
