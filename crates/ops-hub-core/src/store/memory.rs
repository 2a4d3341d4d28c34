//! In-memory Record Store
//!
//! Single-threaded table used by tests and as a reference for the contract.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;

use super::RecordStore;
use crate::entity::{DomainError, DomainResult};
use crate::item::{ItemPatch, ItemType, NewToolboxItem, ToolboxItem};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u32, ToolboxItem>,
    next_id: u32,
    rejected: HashSet<u32>,
}

/// `RecordStore` backed by a `BTreeMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RefCell<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with records as-is (ids kept)
    pub fn with_items(items: impl IntoIterator<Item = ToolboxItem>) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.borrow_mut();
            for item in items {
                table.next_id = table.next_id.max(item.id);
                table.rows.insert(item.id, item);
            }
        }
        store
    }

    /// Every later update of `id` fails with `UpdateRejected`.
    pub fn reject_updates_for(&self, id: u32) {
        self.table.borrow_mut().rejected.insert(id);
    }

    pub fn accept_updates_for(&self, id: u32) {
        self.table.borrow_mut().rejected.remove(&id);
    }

    /// Stored copy, bypassing the async contract
    pub fn snapshot(&self, id: u32) -> Option<ToolboxItem> {
        self.table.borrow().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryStore {
    fn table(&self) -> &str {
        "toolbox_items"
    }

    async fn list(&self, item_type: Option<ItemType>) -> DomainResult<Vec<ToolboxItem>> {
        let table = self.table.borrow();
        Ok(table
            .rows
            .values()
            .filter(|item| item_type.map_or(true, |t| item.item_type == t))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: u32) -> DomainResult<ToolboxItem> {
        self.snapshot(id).ok_or(DomainError::NotFound(id))
    }

    async fn create(&self, draft: &NewToolboxItem) -> DomainResult<ToolboxItem> {
        draft.validate()?;
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let item = ToolboxItem {
            id: table.next_id,
            name: draft.name.clone(),
            item_type: draft.item_type,
            status: draft.status,
            description: draft.description.clone(),
            tags: draft.tags.clone(),
            last_updated: Utc::now(),
            metadata: draft.metadata.clone(),
        };
        table.rows.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: u32, patch: &ItemPatch) -> DomainResult<ToolboxItem> {
        let mut table = self.table.borrow_mut();
        if table.rejected.contains(&id) {
            return Err(DomainError::UpdateRejected(format!("record {} is read-only", id)));
        }
        // Validate before touching the row so a bad field leaves it intact.
        patch.validate()?;
        let item = table.rows.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        let now = Utc::now().max(item.last_updated);
        patch.apply_to(item, now);
        Ok(item.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<bool> {
        match self.table.borrow_mut().rows.remove(&id) {
            Some(_) => Ok(true),
            None => Err(DomainError::NotFound(id)),
        }
    }
}
