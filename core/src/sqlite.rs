//! SQLite-backed todo store.
//!
//! The [`SqliteStore`] wraps a `rusqlite::Connection` behind an
//! `Arc<Mutex<>>` and runs every statement on the blocking pool via
//! `tokio::task::spawn_blocking`. Concurrency control is the engine's plus
//! the connection mutex; each trait method issues one logical statement.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::TodoStore;
use crate::types::{Todo, TodoId};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        item TEXT NOT NULL CHECK (length(item) > 0)
    );
"#;

/// Thread-safe handle to the `todos` table.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists.
    ///
    /// Blocks on file I/O; call it during startup.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening todo database");

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::prepare(conn)
    }

    /// Create a private in-memory database. Useful for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        debug!("opening in-memory todo database");
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        debug!("todo schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn execute<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::TaskJoin(format!("mutex poisoned: {e}")))?;
            f(&conn)
        })
        .await?
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        item: row.get(1)?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn list(&self) -> StoreResult<Vec<Todo>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare("SELECT id, item FROM todos ORDER BY id")?;
            let todos = stmt
                .query_map([], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
        .await
    }

    async fn create(&self, item: String) -> StoreResult<Todo> {
        self.execute(move |conn| {
            conn.execute("INSERT INTO todos (item) VALUES (?1)", params![item])?;
            Ok(Todo {
                id: conn.last_insert_rowid(),
                item,
            })
        })
        .await
    }

    async fn get(&self, id: TodoId) -> StoreResult<Todo> {
        self.execute(move |conn| {
            conn.query_row(
                "SELECT id, item FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?
            .ok_or(StoreError::NotFound { id })
        })
        .await
    }

    async fn update(&self, id: TodoId, item: String) -> StoreResult<Todo> {
        self.execute(move |conn| {
            conn.query_row(
                "UPDATE todos SET item = ?1 WHERE id = ?2 RETURNING id, item",
                params![item, id],
                row_to_todo,
            )
            .optional()?
            .ok_or(StoreError::NotFound { id })
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> StoreResult<bool> {
        self.execute(move |conn| {
            let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.execute(|conn| {
            let removed = conn.execute("DELETE FROM todos", [])?;
            debug!(removed, "cleared todos table");
            Ok(())
        })
        .await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.execute(|conn| {
            let count: i64 = conn.query_row("SELECT count(*) FROM todos", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .execute(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn engine_rejects_empty_item() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.create(String::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn autoincrement_does_not_reuse_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store.create("a".to_string()).await.unwrap();
        store.clear().await.unwrap();
        let second = store.create("b".to_string()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_miss_does_not_insert() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.update(7, "x".to_string()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        let created = {
            let store = SqliteStore::open(&path).unwrap();
            store.create("persist me".to_string()).await.unwrap()
        };

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get(created.id).await.unwrap(), created);
    }
}
