use crate::domain::error::RepoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo, ValidationError};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepoError),
}

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError>;
    async fn get(&self, id: TodoId) -> Result<Todo, ServiceError>;
    /// Applies the update and returns the row as read back afterwards.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, ServiceError>;
    async fn delete(&self, id: TodoId) -> Result<(), ServiceError>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> Result<Vec<Todo>, ServiceError> { Ok(self.repo.list().await?) }

    async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        input.validate()?;
        Ok(self.repo.create(input).await?)
    }

    async fn get(&self, id: TodoId) -> Result<Todo, ServiceError> { Ok(self.repo.get(id).await?) }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, ServiceError> {
        input.validate()?;
        self.repo.update(id, input).await?;
        Ok(self.repo.get(id).await?)
    }

    async fn delete(&self, id: TodoId) -> Result<(), ServiceError> { Ok(self.repo.delete(id).await?) }
}
