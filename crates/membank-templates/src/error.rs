//! Template-related error types

use thiserror::Error;

/// Template operation errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Requested a complexity level outside 1 to 4
    #[error("Unsupported complexity level: {0}")]
    UnsupportedLevel(u8),

    /// Two field definitions share a name within one template
    #[error("Duplicate field definition: {0}")]
    DuplicateField(String),

    /// Filesystem access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing failed
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache subsystem failure
    #[error(transparent)]
    Cache(#[from] membank_cache::CacheError),
}

/// Re-export commonly used Result type
pub type Result<T> = std::result::Result<T, TemplateError>;
