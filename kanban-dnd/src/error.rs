//! Error types for the drag-and-drop engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible engine helpers
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors the engine detects while applying intents.
///
/// These never escape `BoardStore::dispatch` as an `Err`. The store turns
/// them into `DispatchOutcome::Rejected` and logs them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An intent names a column or card that is not on the board
    #[error("{kind} not found: {id}")]
    UnresolvedReference { kind: &'static str, id: String },

    /// A move targets a position outside its container
    #[error("index {index} out of range for container of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A drag event arrived in a session state that cannot accept it
    #[error("illegal drag session state: {message}")]
    IllegalSessionState { message: String },

    /// The hovered item cannot accept the dragged item
    #[error("cannot drop a {dragged} onto a {target}")]
    KindMismatch {
        dragged: &'static str,
        target: &'static str,
    },

    /// Text input was blank
    #[error("text must not be empty")]
    EmptyText,

    /// A board violates a structural invariant
    #[error("board integrity violated: {message}")]
    Integrity { message: String },
}

impl EngineError {
    /// Create an unresolved column reference error
    pub fn unresolved_column(id: impl ToString) -> Self {
        Self::UnresolvedReference {
            kind: "column",
            id: id.to_string(),
        }
    }

    /// Create an unresolved card reference error
    pub fn unresolved_card(id: impl ToString) -> Self {
        Self::UnresolvedReference {
            kind: "card",
            id: id.to_string(),
        }
    }

    /// Create an invalid index error
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Create an illegal session state error
    pub fn illegal_session(message: impl Into<String>) -> Self {
        Self::IllegalSessionState {
            message: message.into(),
        }
    }

    /// Create an integrity error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    /// Check if this error comes from a reference that went stale mid-drag
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }
}

/// Errors raised by a persistence gateway while loading a board
#[derive(Debug, Error)]
pub enum LoadError {
    /// No board exists at the given path
    #[error("board not found at {path}")]
    NotFound { path: PathBuf },

    /// The stored board failed integrity validation
    #[error("invalid board: {0}")]
    Invalid(#[from] EngineError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// Check if the board simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised by a persistence gateway while saving a board
#[derive(Debug, Error)]
pub enum SaveError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not extract the configuration
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::unresolved_card("abc123");
        assert_eq!(err.to_string(), "card not found: abc123");
    }

    #[test]
    fn test_invalid_index_display() {
        let err = EngineError::invalid_index(5, 3);
        assert_eq!(
            err.to_string(),
            "index 5 out of range for container of length 3"
        );
    }

    #[test]
    fn test_stale_reference() {
        assert!(EngineError::unresolved_column("x").is_stale_reference());
        assert!(!EngineError::EmptyText.is_stale_reference());
    }

    #[test]
    fn test_load_error_not_found() {
        let err = LoadError::NotFound {
            path: PathBuf::from("/tmp/board.json"),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("board.json"));
        assert!(!LoadError::Invalid(EngineError::EmptyText).is_not_found());
    }
}
