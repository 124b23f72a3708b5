//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use todo_core::{MemoryStore, SharedStore, SqliteStore, StoreResult};

/// Which `TodoStore` backend to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Ordered list in process memory; lost on exit.
    Memory,
    /// `todos` table in a SQLite file.
    Sqlite,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "HTTP CRUD service for todo items", version)]
pub struct Config {
    /// Address to bind the listener to.
    #[arg(long, env = "TODO_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Storage backend.
    #[arg(long, env = "TODO_STORE", value_enum, default_value = "memory")]
    pub store: StoreKind,

    /// Database file used by the sqlite backend.
    #[arg(long, env = "TODO_DATABASE", default_value = "database.db")]
    pub database: PathBuf,

    /// Default log filter; `RUST_LOG` overrides it.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Build the configured backend.
    pub fn open_store(&self) -> StoreResult<SharedStore> {
        let store: SharedStore = match self.store {
            StoreKind::Memory => Arc::new(MemoryStore::new()),
            StoreKind::Sqlite => Arc::new(SqliteStore::open(&self.database)?),
        };
        Ok(store)
    }
}
