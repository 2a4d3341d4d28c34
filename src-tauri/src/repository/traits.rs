//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use ops_hub_core::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type. Creation takes a draft without an id,
/// updates take a partial patch.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    type Draft: Send + Sync;
    type Patch: Send + Sync;

    /// Create a new entity
    async fn create(&self, draft: &Self::Draft) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Apply the supplied fields; all or nothing
    async fn update(&self, id: T::Id, patch: &Self::Patch) -> DomainResult<T>;

    /// Delete entity by ID; a missing id is an error
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories that can narrow a listing by a category
#[async_trait]
pub trait FilterableRepository<T: Entity>: Repository<T> {
    type Filter: Send + Sync;

    async fn list_by(&self, filter: Self::Filter) -> DomainResult<Vec<T>>;
}
