//! Application State
//!
//! What the IPC commands share: the repository and the loaded config.

use std::path::Path;

use ops_hub_core::{DomainError, DomainResult, ItemPatch, ItemType, NewToolboxItem, ToolboxItem};

use crate::config::AppConfig;
use crate::repository::{init_db, FilterableRepository, Repository, ToolboxRepository};

pub struct AppState {
    pub repo: ToolboxRepository,
    pub config: AppConfig,
}

impl AppState {
    /// Open the database at `db_path` with the limits from `config`
    pub fn open(config: AppConfig, db_path: &Path) -> DomainResult<Self> {
        let db_state = init_db(db_path)?;
        let repo = ToolboxRepository::new(db_state.connection(), config.page_size);
        Ok(Self { repo, config })
    }

    pub async fn list_items(&self, item_type: Option<ItemType>) -> DomainResult<Vec<ToolboxItem>> {
        match item_type {
            Some(item_type) => self.repo.list_by(item_type).await,
            None => self.repo.list().await,
        }
    }

    pub async fn get_item(&self, id: u32) -> DomainResult<ToolboxItem> {
        self.repo.find_by_id(id).await?.ok_or(DomainError::NotFound(id))
    }

    pub async fn create_item(&self, draft: &NewToolboxItem) -> DomainResult<ToolboxItem> {
        let created = self.repo.create(draft).await?;
        log::info!("created toolbox item {} ({})", created.id, created.item_type.as_str());
        Ok(created)
    }

    pub async fn update_item(&self, id: u32, patch: &ItemPatch) -> DomainResult<ToolboxItem> {
        self.repo.update(id, patch).await.map_err(|e| {
            log::warn!("update of toolbox item {} failed: {}", id, e);
            e
        })
    }

    pub async fn delete_item(&self, id: u32) -> DomainResult<bool> {
        self.repo.delete(id).await?;
        log::info!("deleted toolbox item {}", id);
        Ok(true)
    }
}
