use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefdexError {
    #[error("Index not found: {0}")]
    NotFound(String),

    #[error("Index already exists: {0}")]
    Conflict(String),

    #[error("No index loaded (run `refdex load <title>` or pass --index)")]
    NoActiveIndex,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<lopdf::Error> for RefdexError {
    fn from(e: lopdf::Error) -> Self {
        RefdexError::Pdf(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RefdexError>;
