//! Storage core for the todo service.
//!
//! # Overview
//! Defines the `Todo` record, the [`TodoStore`] trait the HTTP layer depends
//! on, and two backends: [`MemoryStore`] (ordered list behind a lock) and
//! [`SqliteStore`] (an auto-increment `todos` table).
//!
//! # Design
//! - Backends are chosen at startup and shared as [`SharedStore`]; there is
//!   no process-wide state, so every test builds its own store.
//! - Each store method is one atomic operation. Validation of request
//!   payloads belongs to the caller.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{SharedStore, TodoStore};
pub use types::{Todo, TodoId, TodoItem};
