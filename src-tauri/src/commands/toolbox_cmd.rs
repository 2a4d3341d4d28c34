//! Tauri Commands for Toolbox Item CRUD
//!
//! Exposes the record store to the frontend via Tauri IPC. Errors reach the
//! frontend as serialized `DomainError` values.

use tauri::State;

use ops_hub_core::{DomainError, ItemPatch, ItemType, NewToolboxItem, ToolboxItem};

use crate::AppState;

/// List items, optionally of one type
#[tauri::command]
pub async fn list_toolbox_items(
    state: State<'_, AppState>,
    item_type: Option<ItemType>,
) -> Result<Vec<ToolboxItem>, DomainError> {
    state.list_items(item_type).await
}

/// Get item by ID
#[tauri::command]
pub async fn get_toolbox_item(state: State<'_, AppState>, id: u32) -> Result<ToolboxItem, DomainError> {
    state.get_item(id).await
}

/// Create a new item
#[tauri::command]
pub async fn create_toolbox_item(
    state: State<'_, AppState>,
    draft: NewToolboxItem,
) -> Result<ToolboxItem, DomainError> {
    state.create_item(&draft).await
}

/// Apply a partial update
#[tauri::command]
pub async fn update_toolbox_item(
    state: State<'_, AppState>,
    id: u32,
    patch: ItemPatch,
) -> Result<ToolboxItem, DomainError> {
    state.update_item(id, &patch).await
}

/// Delete item
#[tauri::command]
pub async fn delete_toolbox_item(state: State<'_, AppState>, id: u32) -> Result<bool, DomainError> {
    state.delete_item(id).await
}
