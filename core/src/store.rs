//! The storage seam shared by every backend.
//!
//! Handlers depend only on [`TodoStore`]; the concrete backend is chosen once
//! at startup and shared as a [`SharedStore`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Todo, TodoId};

/// A store handle shared across request tasks.
pub type SharedStore = Arc<dyn TodoStore>;

/// CRUD operations over the todo collection.
///
/// Every method is a single atomic operation: a failed call leaves the
/// collection exactly as it was.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos in store order. Empty when none exist.
    async fn list(&self) -> StoreResult<Vec<Todo>>;

    /// Assign a fresh id, store the record and return it.
    async fn create(&self, item: String) -> StoreResult<Todo>;

    /// Fetch one todo, or `StoreError::NotFound`.
    async fn get(&self, id: TodoId) -> StoreResult<Todo>;

    /// Replace the text of an existing todo. Never inserts on a miss.
    async fn update(&self, id: TodoId, item: String) -> StoreResult<Todo>;

    /// Remove a todo. Returns `false` when no record had that id.
    async fn delete(&self, id: TodoId) -> StoreResult<bool>;

    /// Remove every todo. Ids handed out so far stay retired.
    async fn clear(&self) -> StoreResult<()>;

    /// Number of live todos.
    async fn count(&self) -> StoreResult<usize>;

    /// Short backend name used in startup logs.
    fn backend(&self) -> &'static str;
}
