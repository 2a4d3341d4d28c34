//! Core Entity Trait and Domain Errors
//!
//! Every stored record has a unique ID. All store-boundary failures are
//! expressed as `DomainError` so they can cross the IPC boundary intact.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum DomainError {
    #[error("Not found: toolbox item {0}")]
    NotFound(u32),
    #[error("Update rejected: {0}")]
    UpdateRejected(String),
    #[error("Create rejected: {0}")]
    CreateRejected(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether the caller's list holds a reference the store no longer knows.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}
