//! Error types for Tutorbot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Response library error: {0}")]
    Library(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
