//! Error types for the workflow URL codec
//!
//! None of these escape [`WorkflowCodec::parse`](crate::WorkflowCodec::parse),
//! which degrades to the not-found state instead.

use navstack_entity::EntityType;

/// Errors while decoding or encoding a workflow URL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Path names a use case the catalog does not know
    #[error("unknown use case: '{0}'")]
    UnknownUseCase(String),

    /// Path segment is not an entity slug of the use case
    #[error("unknown entity type: '{0}'")]
    UnknownEntityType(String),

    /// Path segment cannot be decoded
    #[error("malformed segment '{segment}': {reason}")]
    MalformedSegment {
        /// Offending path segment
        segment: String,
        /// What is wrong with it
        reason: String,
    },

    /// Query parameter cannot be decoded
    #[error("malformed query parameter '{key}': {reason}")]
    MalformedQuery {
        /// Offending query key
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// Entry search given for a state without stack entries
    #[error("search parameters given for an empty stack")]
    EmptyStack,

    /// Entity type has no descriptor to encode it with
    #[error("entity type {0} has no URL slug")]
    Unencodable(EntityType),
}

impl CodecError {
    /// Create malformed-segment error
    pub fn segment(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSegment {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Create malformed-query error
    pub fn query(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedQuery {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
