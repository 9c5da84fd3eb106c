use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use duckdb::Connection;
use prodline_core::error::{ProdlineError, Result};
use prodline_core::query::StoreStatus;

use crate::schema::{qualified_table, schema_sql};

/// Handle to the `order_data` table.
///
/// The schema is created once when the store is opened. Every operation
/// borrows the single connection through [`Store::conn`] and releases it when
/// the guard drops, so callers never hold a connection across requests.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
    table: String,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| ProdlineError::Io(format!("failed to create db dir: {e}")))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| ProdlineError::Store(format!("failed to open duckdb: {e}")))?;
        let store = Self::init(conn, path.display().to_string())?;
        tracing::debug!(path = %path.display(), table = %store.table, "order store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ProdlineError::Store(format!("failed to open in-memory db: {e}")))?;
        Self::init(conn, ":memory:".to_string())
    }

    fn init(conn: Connection, db_path: String) -> Result<Self> {
        let catalog = conn
            .query_row("SELECT current_database()", [], |row| row.get::<_, String>(0))
            .map_err(|e| ProdlineError::Store(format!("failed to read catalog name: {e}")))?;
        conn.execute_batch(&schema_sql(&catalog))
            .map_err(|e| ProdlineError::Store(format!("failed to initialize schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path,
            table: qualified_table(&catalog),
        })
    }

    /// Fully qualified `order_data` name for SQL text.
    pub(crate) fn table(&self) -> &str {
        &self.table
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }

    pub fn status(&self) -> Result<StoreStatus> {
        let conn = self.conn();
        let table = self.table();

        let rows = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|v| v as usize)
            .map_err(|e| ProdlineError::Store(format!("count rows failed: {e}")))?;
        let newest_time = first_row(
            &conn,
            &format!("SELECT time FROM {table} ORDER BY time DESC LIMIT 1"),
            |row| row.get::<_, String>(0),
        )?;

        let db_size_bytes = if self.db_path == ":memory:" {
            0
        } else {
            fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStatus {
            db_path: self.db_path.clone(),
            db_size_bytes,
            rows,
            newest_time,
        })
    }
}

/// Runs `sql` and maps the first row, if any.
pub(crate) fn first_row<T, F>(conn: &Connection, sql: &str, map: F) -> Result<Option<T>>
where
    F: FnMut(&duckdb::Row<'_>) -> duckdb::Result<T>,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ProdlineError::Store(format!("prepare query failed: {e}")))?;
    let mut rows = stmt
        .query_map([], map)
        .map_err(|e| ProdlineError::Store(format!("query failed: {e}")))?;
    rows.next()
        .transpose()
        .map_err(|e| ProdlineError::Store(format!("map row failed: {e}")))
}
