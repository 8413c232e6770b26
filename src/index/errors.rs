//! Index error types
//!
//! The in-memory structures never fail; these errors only arise when loading
//! untyped JSON records whose primary key cannot be derived.

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised while admitting JSON records into an index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no usable primary key field '{0}'")]
    MissingPrimaryKey(String),
}

impl IndexError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::NotAnObject => "INDEX_NOT_AN_OBJECT",
            IndexError::MissingPrimaryKey(_) => "INDEX_MISSING_PRIMARY_KEY",
        }
    }
}
