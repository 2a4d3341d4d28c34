//! Toolbox Commands
//!
//! `RecordStore` over the desktop IPC commands.

use async_trait::async_trait;
use serde::Serialize;

use ops_hub_core::{DomainResult, ItemPatch, ItemType, NewToolboxItem, RecordStore, ToolboxItem};

use super::call;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ListArgs {
    #[serde(rename = "itemType")]
    item_type: Option<ItemType>,
}

#[derive(Serialize)]
struct IdArgs {
    id: u32,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    draft: &'a NewToolboxItem,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    id: u32,
    patch: &'a ItemPatch,
}

// ========================
// Store
// ========================

/// Record store served by the desktop backend
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriStore;

#[async_trait(?Send)]
impl RecordStore for TauriStore {
    fn table(&self) -> &str {
        "toolbox_items"
    }

    async fn list(&self, item_type: Option<ItemType>) -> DomainResult<Vec<ToolboxItem>> {
        call("list_toolbox_items", &ListArgs { item_type }).await
    }

    async fn get_by_id(&self, id: u32) -> DomainResult<ToolboxItem> {
        call("get_toolbox_item", &IdArgs { id }).await
    }

    async fn create(&self, draft: &NewToolboxItem) -> DomainResult<ToolboxItem> {
        call("create_toolbox_item", &CreateArgs { draft }).await
    }

    async fn update(&self, id: u32, patch: &ItemPatch) -> DomainResult<ToolboxItem> {
        call("update_toolbox_item", &UpdateArgs { id, patch }).await
    }

    async fn delete(&self, id: u32) -> DomainResult<bool> {
        call("delete_toolbox_item", &IdArgs { id }).await
    }
}
