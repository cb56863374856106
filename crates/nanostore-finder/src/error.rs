//! Error types for the finder crate.

use thiserror::Error;

/// Errors that can occur when translating or executing a find.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    /// The call does not match either accepted argument shape.
    #[error("unexpected parameters: {0}")]
    InvalidArguments(String),

    /// An operator name that the search engine does not know.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// A sort direction that is neither a boolean nor a recognized token.
    #[error("unsupported sort parameters: {0}")]
    UnsupportedSortValue(String),

    /// The search engine reported a failure. The message is the engine's own.
    #[error("{0}")]
    SearchEngine(String),
}

impl FinderError {
    /// Returns `true` for errors caused by the caller's arguments rather than
    /// the search engine.
    pub fn is_argument_error(&self) -> bool {
        !matches!(self, FinderError::SearchEngine(_))
    }
}

/// Result type for finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_message_is_verbatim() {
        let err = FinderError::SearchEngine("database is locked".to_string());
        assert_eq!(err.to_string(), "database is locked");
        assert!(!err.is_argument_error());
    }

    #[test]
    fn argument_errors() {
        assert!(FinderError::InvalidArguments("[]".into()).is_argument_error());
        assert!(FinderError::UnknownOperator("Like".into()).is_argument_error());
        assert_eq!(
            FinderError::UnsupportedSortValue("asc".into()).to_string(),
            "unsupported sort parameters: asc"
        );
    }
}
