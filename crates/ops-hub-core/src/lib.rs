//! OPS Hub Core
//!
//! Toolbox board domain shared by the desktop backend and the UI:
//! - taxonomy: fixed section/subsection table
//! - item: toolbox records and their create/patch inputs
//! - classification: metadata codec and `classify`
//! - partition: section/subsection filters
//! - store: record store contract and in-memory implementation
//! - operations: reassign, status toggle, create, delete
//! - board: page-level item list with stale-response protection

mod entity;
mod taxonomy;
mod item;
mod classification;
mod partition;
mod operations;
mod board;
pub mod store;

pub use entity::{Entity, DomainError, DomainResult};
pub use taxonomy::{Section, SectionSpec, Subsection, SubsectionSpec, TAXONOMY};
pub use item::{ItemPatch, ItemStatus, ItemType, NewToolboxItem, ToolboxItem};
pub use classification::{classify, Classification, ClassificationError, ClassificationPayload};
pub use partition::{partition, partition_by_subsection, unassigned_in_section, BoardSummary};
pub use operations::{create_item, delete_item, reassign, reassign_to, toggle_status};
pub use board::{Board, ReassignTicket, Settlement};
pub use store::{MemoryStore, RecordStore};
