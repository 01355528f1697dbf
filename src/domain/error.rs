//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(NodeId),

    #[error("root node not found")]
    RootNotFound,

    #[error("unsupported file kind: {0}")]
    UnsupportedKind(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("cycle detected in hierarchy at node: {0}")]
    CycleDetected(NodeId),
}

impl DomainError {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
