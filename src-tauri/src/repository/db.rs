//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use ops_hub_core::{DomainError, DomainResult};

/// Shared connection; every repository call takes the lock
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
}

impl DbState {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Arc::new(Mutex::new(conn)) }
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }
}

/// Open the database at `db_path` (`:memory:` for tests) and migrate it
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DomainError::Internal(format!("Failed to create db dir: {}", e)))?;
    }
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;
    log::info!("database ready at {}", db_path.display());
    Ok(DbState::new(conn))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else { return false };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else { return false };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Columns added after the first release of the table
const LATE_COLUMNS: &[(&str, &str)] = &[
    ("status", "ALTER TABLE toolbox_items ADD COLUMN status TEXT NOT NULL DEFAULT 'active'"),
    ("description", "ALTER TABLE toolbox_items ADD COLUMN description TEXT NOT NULL DEFAULT ''"),
    ("tags", "ALTER TABLE toolbox_items ADD COLUMN tags TEXT"),
    ("metadata", "ALTER TABLE toolbox_items ADD COLUMN metadata TEXT"),
];

/// Run database migrations
pub(crate) fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS toolbox_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            item_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            description TEXT NOT NULL DEFAULT '',
            tags TEXT,
            metadata TEXT,
            last_updated TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    for (column, ddl) in LATE_COLUMNS {
        if !column_exists(conn, "toolbox_items", column) {
            conn.execute(ddl, [])
                .map_err(|e| DomainError::Internal(format!("Failed to add {}: {}", column, e)))?;
            log::info!("migrated toolbox_items: added {}", column);
        }
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_toolbox_items_type ON toolbox_items(item_type)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_table_gains_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE toolbox_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                item_type TEXT NOT NULL,
                last_updated TEXT NOT NULL
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO toolbox_items (name, item_type, last_updated) VALUES ('CRM', 'system', '2024-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

        run_migrations(&conn).unwrap();
        for (column, _) in LATE_COLUMNS {
            assert!(column_exists(&conn, "toolbox_items", column), "missing {}", column);
        }
        let status: String = conn
            .query_row("SELECT status FROM toolbox_items WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "active");
    }

    #[test]
    fn test_migrations_are_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert!(!column_exists(&conn, "toolbox_items", "position"));
    }
}
