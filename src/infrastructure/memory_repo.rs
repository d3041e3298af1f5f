use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    error::RepoError,
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

/// Process-local repository used by tests. Can be switched into a failing
/// state to exercise the storage-failure paths.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    rows: Arc<Mutex<Rows>>,
    unavailable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

#[derive(Default)]
struct Rows {
    items: BTreeMap<TodoId, Todo>,
    last_id: i64,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }

    /// While set, every operation fails as if the connection were lost.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of operations that reached the store.
    pub fn store_calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    fn enter(&self) -> Result<(), RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::Storage(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, RepoError> {
        self.enter()?;
        Ok(self.rows.lock().await.items.values().cloned().collect())
    }

    async fn get(&self, id: TodoId) -> Result<Todo, RepoError> {
        self.enter()?;
        self.rows.lock().await.items.get(&id).cloned().ok_or(RepoError::NotFound(id))
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo, RepoError> {
        self.enter()?;
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let id = TodoId(rows.last_id);
        let todo = Todo { id, description: input.description, is_done: false };
        rows.items.insert(id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepoError> {
        self.enter()?;
        self.rows.lock().await.items.remove(&id);
        Ok(())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<(), RepoError> {
        self.enter()?;
        let mut rows = self.rows.lock().await;
        let todo = rows.items.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        todo.description = input.description;
        todo.is_done = input.is_done;
        Ok(())
    }
}
