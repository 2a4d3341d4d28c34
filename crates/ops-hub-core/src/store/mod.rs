//! Record Store Client
//!
//! The CRUD contract the board needs from whatever persists toolbox records.
//! The UI runs single-threaded and suspends only on I/O, so futures are not
//! required to be `Send`.

mod memory;

use async_trait::async_trait;

use crate::entity::DomainResult;
use crate::item::{ItemPatch, ItemType, NewToolboxItem, ToolboxItem};

pub use memory::MemoryStore;

/// Generic CRUD over the toolbox collection
#[async_trait(?Send)]
pub trait RecordStore {
    /// Collection name, used in log lines
    fn table(&self) -> &str;

    /// All records ordered by id, optionally of one type. Empty is not an error.
    async fn list(&self, item_type: Option<ItemType>) -> DomainResult<Vec<ToolboxItem>>;

    /// Fails with `NotFound` for an unknown id
    async fn get_by_id(&self, id: u32) -> DomainResult<ToolboxItem>;

    /// Assigns the id and `last_updated`; fails with `CreateRejected`
    async fn create(&self, draft: &NewToolboxItem) -> DomainResult<ToolboxItem>;

    /// Applies every supplied field or none of them, always refreshing
    /// `last_updated`. Fails with `NotFound` or `UpdateRejected`.
    async fn update(&self, id: u32, patch: &ItemPatch) -> DomainResult<ToolboxItem>;

    /// `Ok(true)` once removed; an unknown id fails with `NotFound`
    async fn delete(&self, id: u32) -> DomainResult<bool>;
}
