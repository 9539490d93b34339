//! Response generation for classified intents.
//!
//! Literal teaching content lives in a JSON library (embedded by default,
//! replaceable from disk). The dispatcher picks a strategy from the intent
//! type and looks up the most specific entry for (topic, strategy, level,
//! format), falling back to a templated answer flagged `is_fallback`.

pub mod dispatch;
pub mod library;
pub mod types;

pub use dispatch::Dispatcher;
pub use library::{ResponseEntry, ResponseLibrary};
pub use types::{Reply, Strategy};
