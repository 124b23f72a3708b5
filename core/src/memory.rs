//! Process-memory todo store.
//!
//! # Design
//! The ordered list and the id counter live in one struct behind one
//! `RwLock`, so assigning an id and appending the record are a single
//! critical section. Reads take the read guard and clone out a snapshot;
//! nothing is held across an `.await` or JSON work.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::TodoStore;
use crate::types::{Todo, TodoId};

#[derive(Debug)]
struct Inner {
    todos: Vec<Todo>,
    next_id: TodoId,
}

/// In-memory store preserving insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.inner.read().await.todos.clone())
    }

    async fn create(&self, item: String) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        let todo = Todo {
            id: inner.next_id,
            item,
        };
        inner.next_id += 1;
        inner.todos.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> StoreResult<Todo> {
        let inner = self.inner.read().await;
        inner
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&self, id: TodoId, item: String) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound { id })?;
        todo.item = item;
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.todos.iter().position(|todo| todo.id == id) {
            Some(index) => {
                inner.todos.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self) -> StoreResult<()> {
        self.inner.write().await.todos.clear();
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.inner.read().await.todos.len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
