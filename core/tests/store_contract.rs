//! One behavioural contract, checked against every store backend.
//!
//! Each scenario takes a fresh store so the backends are exercised the same
//! way the server uses them: through `Arc<dyn TodoStore>`.

use std::sync::Arc;

use todo_core::{MemoryStore, SharedStore, SqliteStore, StoreError, Todo};

fn backends() -> Vec<SharedStore> {
    vec![
        Arc::new(MemoryStore::new()),
        Arc::new(SqliteStore::open_in_memory().unwrap()),
    ]
}

#[tokio::test]
async fn list_is_empty_on_a_fresh_store() {
    for store in backends() {
        let todos = store.list().await.unwrap();
        assert!(todos.is_empty(), "{}: expected empty list", store.backend());
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    for store in backends() {
        let created = store.create("buy milk".to_string()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.item, "buy milk", "{}", store.backend());
        assert_eq!(fetched, created, "{}", store.backend());
    }
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
    for store in backends() {
        let mut last = 0;
        for i in 0..10 {
            let todo = store.create(format!("todo {i}")).await.unwrap();
            assert!(todo.id > last, "{}: {} <= {last}", store.backend(), todo.id);
            last = todo.id;
        }
    }
}

#[tokio::test]
async fn get_missing_is_not_found() {
    for store in backends() {
        let err = store.get(999).await.unwrap_err();
        assert!(
            matches!(err, StoreError::NotFound { id: 999 }),
            "{}: {err}",
            store.backend()
        );
    }
}

#[tokio::test]
async fn update_replaces_item_only() {
    for store in backends() {
        let created = store.create("a".to_string()).await.unwrap();
        let updated = store.update(created.id, "b".to_string()).await.unwrap();
        assert_eq!(
            updated,
            Todo {
                id: created.id,
                item: "b".to_string()
            },
            "{}",
            store.backend()
        );
        assert_eq!(store.get(created.id).await.unwrap().item, "b");
    }
}

#[tokio::test]
async fn update_missing_does_not_upsert() {
    for store in backends() {
        store.create("keep".to_string()).await.unwrap();
        let before = store.list().await.unwrap();

        let err = store.update(999, "ghost".to_string()).await.unwrap_err();
        assert!(err.is_not_found(), "{}", store.backend());
        assert_eq!(store.list().await.unwrap(), before, "{}", store.backend());
    }
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() {
    for store in backends() {
        let created = store.create("a".to_string()).await.unwrap();
        assert!(store.delete(created.id).await.unwrap(), "{}", store.backend());
        assert!(!store.delete(created.id).await.unwrap(), "{}", store.backend());
        assert!(store.get(created.id).await.unwrap_err().is_not_found());
    }
}

#[tokio::test]
async fn delete_missing_leaves_collection_unchanged() {
    for store in backends() {
        store.create("a".to_string()).await.unwrap();
        store.create("b".to_string()).await.unwrap();
        let before = store.list().await.unwrap();

        assert!(!store.delete(999).await.unwrap());
        assert_eq!(store.list().await.unwrap(), before, "{}", store.backend());
    }
}

#[tokio::test]
async fn clear_is_idempotent() {
    for store in backends() {
        store.create("a".to_string()).await.unwrap();
        store.create("b".to_string()).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty(), "{}", store.backend());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_share_an_id() {
    for store in backends() {
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(format!("parallel {i}")).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32, "{}", store.backend());
        assert_eq!(store.list().await.unwrap().len(), 32, "{}", store.backend());
    }
}
