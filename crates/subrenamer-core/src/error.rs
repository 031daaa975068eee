//! Error types for SubRenamer core operations.

use std::fmt;

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The piece of metadata the host failed to identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// No series (anime) was matched for the file.
    Series,
    /// No episode was matched for the file.
    Episode,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series => write!(f, "Anime"),
            Self::Episode => write!(f, "Episode"),
        }
    }
}

/// Errors produced by the naming policy for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Required metadata is missing; the host should cancel the move.
    #[error("{0} not identified")]
    NotIdentified(Subject),

    /// The host offered no import folders at all.
    #[error("No import folders available")]
    NoImportFolders,

    /// Any other fault raised while computing the new path.
    #[error("Unexpected failure: {cause}")]
    Unexpected {
        /// Description of the underlying fault.
        cause: String,
    },
}

impl NamingError {
    /// Wrap an arbitrary fault.
    pub fn unexpected(cause: impl fmt::Display) -> Self {
        Self::Unexpected {
            cause: cause.to_string(),
        }
    }

    /// Whether the host should abort processing of this file.
    #[must_use]
    pub const fn should_cancel(&self) -> bool {
        matches!(self, Self::NotIdentified(_))
    }
}

/// Errors that can occur in SubRenamer core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Naming policy failure.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
