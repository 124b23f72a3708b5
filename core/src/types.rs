//! Domain DTOs for the todo service.
//!
//! # Design
//! `Todo` is the only entity. Stores hand out owned copies, so handlers never
//! hold a reference into a store's collection across an await point.

use serde::{Deserialize, Serialize};

/// Identifier assigned by a store. Never reused within one store instance.
pub type TodoId = i64;

/// A single todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub item: String,
}

/// Request payload for creating or replacing a todo's text.
///
/// The `item` field is required; an empty string decodes fine and is rejected
/// by the HTTP layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub item: String,
}

impl TodoItem {
    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }
}
