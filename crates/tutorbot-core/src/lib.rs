//! Tutorbot Core: shared error type and configuration.

pub mod config;
pub mod error;

pub use config::TutorConfig;
pub use error::{Error, Result};
