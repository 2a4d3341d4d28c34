//! Toolbox Repository
//!
//! SQLite-backed implementation for toolbox item CRUD.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use ops_hub_core::{DomainError, DomainResult, ItemPatch, ItemStatus, ItemType, NewToolboxItem, ToolboxItem};

use super::traits::{FilterableRepository, Repository};

const COLUMNS: &str = "id, name, item_type, status, description, tags, metadata, last_updated";

/// SQLite implementation of the toolbox repository
pub struct ToolboxRepository {
    conn: Arc<Mutex<Connection>>,
    page_size: u32,
}

impl ToolboxRepository {
    pub fn new(conn: Arc<Mutex<Connection>>, page_size: u32) -> Self {
        Self { conn, page_size: page_size.max(1) }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn find(conn: &Connection, id: u32) -> DomainResult<Option<ToolboxItem>> {
    conn.query_row(
        &format!("SELECT {} FROM toolbox_items WHERE id = ?1", COLUMNS),
        params![id],
        row_to_item,
    )
    .optional()
    .map_err(|e| DomainError::Internal(e.to_string()))
}

#[async_trait]
impl Repository<ToolboxItem> for ToolboxRepository {
    type Draft = NewToolboxItem;
    type Patch = ItemPatch;

    async fn create(&self, draft: &NewToolboxItem) -> DomainResult<ToolboxItem> {
        draft.validate()?;
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO toolbox_items (name, item_type, status, description, tags, metadata, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                draft.name,
                draft.item_type.as_str(),
                draft.status.as_str(),
                draft.description,
                draft.tags,
                draft.metadata,
                timestamp(Utc::now()),
            ],
        )
        .map_err(|e| DomainError::CreateRejected(e.to_string()))?;

        let id = u32::try_from(conn.last_insert_rowid())
            .map_err(|e| DomainError::Internal(format!("row id out of range: {}", e)))?;
        find(&conn, id)?.ok_or_else(|| DomainError::Internal(format!("created row {} vanished", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ToolboxItem>> {
        let conn = self.conn.lock().await;
        find(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<ToolboxItem>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM toolbox_items ORDER BY id LIMIT ?1", COLUMNS))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map(params![self.page_size], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn update(&self, id: u32, patch: &ItemPatch) -> DomainResult<ToolboxItem> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(|e| DomainError::Internal(e.to_string()))?;

        let existing = find(&tx, id)?.ok_or(DomainError::NotFound(id))?;
        patch.validate()?;

        // One statement for all fields; unsupplied ones keep their value.
        let now = Utc::now().max(existing.last_updated);
        tx.execute(
            "UPDATE toolbox_items SET
                name = COALESCE(?1, name),
                status = COALESCE(?2, status),
                description = COALESCE(?3, description),
                tags = COALESCE(?4, tags),
                metadata = COALESCE(?5, metadata),
                last_updated = ?6
             WHERE id = ?7",
            params![
                patch.name,
                patch.status.map(|s| s.as_str()),
                patch.description,
                patch.tags,
                patch.metadata,
                timestamp(now),
                id,
            ],
        )
        .map_err(|e| DomainError::UpdateRejected(e.to_string()))?;

        let updated = find(&tx, id)?.ok_or(DomainError::NotFound(id))?;
        tx.commit().map_err(|e| DomainError::UpdateRejected(e.to_string()))?;
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changes = conn
            .execute("DELETE FROM toolbox_items WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changes == 0 {
            return Err(DomainError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl FilterableRepository<ToolboxItem> for ToolboxRepository {
    type Filter = ItemType;

    async fn list_by(&self, item_type: ItemType) -> DomainResult<Vec<ToolboxItem>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM toolbox_items WHERE item_type = ?1 ORDER BY id LIMIT ?2",
                COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map(params![item_type.as_str(), self.page_size], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// Convert a database row to ToolboxItem
fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ToolboxItem> {
    let item_type: String = row.get(2)?;
    let status: String = row.get(3)?;
    let last_updated: String = row.get(7)?;
    let last_updated = DateTime::parse_from_rfc3339(&last_updated)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(ToolboxItem {
        id: row.get(0)?,
        name: row.get(1)?,
        item_type: ItemType::parse(&item_type).unwrap_or_default(),
        status: ItemStatus::parse(&status).unwrap_or_default(),
        description: row.get(4)?,
        tags: row.get(5)?,
        metadata: row.get(6)?,
        last_updated,
    })
}
