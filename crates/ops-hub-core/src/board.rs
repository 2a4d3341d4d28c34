//! Board Controller
//!
//! Owns the in-memory item list of a board page. Reassignments go through
//! tickets: `issue` stamps a per-item sequence number when the drop happens,
//! `settle` applies the store's answer only if no newer move of the same
//! item was issued in the meantime.

use std::collections::HashMap;

use crate::classification::{classify, Classification};
use crate::entity::{DomainError, DomainResult};
use crate::item::ToolboxItem;
use crate::operations;
use crate::partition::{self, BoardSummary};
use crate::store::RecordStore;
use crate::taxonomy::{Section, Subsection};

/// A reassignment in flight
#[derive(Debug, Clone, PartialEq)]
pub struct ReassignTicket {
    /// Snapshot of the item at drop time
    pub item: ToolboxItem,
    pub target: Classification,
    seq: u64,
}

impl ReassignTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What `settle` did with a store response
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The list now holds this item
    Applied(ToolboxItem),
    /// A newer move of the same item was issued; response dropped
    Stale,
    /// The latest move failed; the list is unchanged
    Failed(DomainError),
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    items: Vec<ToolboxItem>,
    latest: HashMap<u32, u64>,
    next_seq: u64,
}

impl Board {
    pub fn new(items: Vec<ToolboxItem>) -> Self {
        Self { items, ..Default::default() }
    }

    /// Reload; responses to earlier tickets become stale
    pub fn replace_all(&mut self, items: Vec<ToolboxItem>) {
        self.items = items;
        self.latest.clear();
    }

    pub fn items(&self) -> &[ToolboxItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&ToolboxItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replace the entry with the same id, or append
    pub fn upsert(&mut self, item: ToolboxItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: u32) -> Option<ToolboxItem> {
        self.latest.remove(&id);
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn section(&self, section: Section) -> Vec<&ToolboxItem> {
        partition::partition(&self.items, section)
    }

    pub fn subsection(&self, section: Section, subsection: Subsection) -> Vec<&ToolboxItem> {
        partition::partition_by_subsection(&self.items, section, subsection)
    }

    pub fn unassigned(&self, section: Section) -> Vec<&ToolboxItem> {
        partition::unassigned_in_section(&self.items, section)
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary::of(&self.items)
    }

    /// Whether a drop of `id` onto `target` has to reach the store. Only an
    /// item with no move in flight that already sits in `target` can skip it.
    pub fn needs_move(&self, id: u32, target: Classification) -> bool {
        if self.latest.contains_key(&id) {
            return true;
        }
        match self.get(id) {
            Some(item) => classify(item) != target,
            None => true,
        }
    }

    /// Starts a move of the dragged `id`, resolved from this list
    pub fn issue(&mut self, id: u32, target: Classification) -> DomainResult<ReassignTicket> {
        let item = self.get(id).cloned().ok_or(DomainError::NotFound(id))?;
        self.next_seq += 1;
        self.latest.insert(id, self.next_seq);
        Ok(ReassignTicket { item, target, seq: self.next_seq })
    }

    /// Applies a store response for `ticket`
    pub fn settle(&mut self, ticket: ReassignTicket, result: DomainResult<ToolboxItem>) -> Settlement {
        let id = ticket.item.id;
        if self.latest.get(&id) != Some(&ticket.seq) {
            log::debug!("board: dropping stale response #{} for item {}", ticket.seq, id);
            return Settlement::Stale;
        }
        self.latest.remove(&id);
        match result {
            Ok(updated) => {
                self.upsert(updated.clone());
                Settlement::Applied(updated)
            }
            Err(e) => Settlement::Failed(e),
        }
    }

    /// Issue, call the store, settle
    pub async fn reassign<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        id: u32,
        target: Classification,
    ) -> Settlement {
        let ticket = match self.issue(id, target) {
            Ok(ticket) => ticket,
            Err(e) => return Settlement::Failed(e),
        };
        let result = operations::reassign_to(store, &ticket.item, target).await;
        self.settle(ticket, result)
    }
}
