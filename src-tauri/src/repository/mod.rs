//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod toolbox_repo;

#[cfg(test)]
mod tests;

pub use traits::{FilterableRepository, Repository};
pub use db::{init_db, DbState};
pub use toolbox_repo::ToolboxRepository;
