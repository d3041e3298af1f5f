use async_trait::async_trait;

use super::error::RepoError;
use super::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Storage capability for todos. Callers validate input before handing it over.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// All rows, ordered by id. An empty store is not an error.
    async fn list(&self) -> Result<Vec<Todo>, RepoError>;
    async fn get(&self, id: TodoId) -> Result<Todo, RepoError>;
    /// Inserts with `is_done = false` and returns the row as the store reads it back.
    async fn create(&self, input: CreateTodo) -> Result<Todo, RepoError>;
    /// Idempotent: removing an absent id succeeds.
    async fn delete(&self, id: TodoId) -> Result<(), RepoError>;
    /// Overwrites description and completion flag; `NotFound` when no row was touched.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<(), RepoError>;
}
