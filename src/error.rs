//! Error types for markup engine operations.

use thiserror::Error;

/// Errors that can occur at the engine's fallible seams.
///
/// Scale parsing and gesture finalization are deliberately infallible and
/// return `Option` instead; see the scale and editor modules.
#[derive(Error, Debug)]
pub enum MarkupError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external persistence store rejected an operation
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description from the external store
        message: String,
    },

    /// An annotation ID was referenced but not found
    #[error("Annotation not found: {id}")]
    AnnotationNotFound {
        /// The missing annotation ID
        id: u64,
    },
}

impl MarkupError {
    /// Create a persistence error with a message.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}
