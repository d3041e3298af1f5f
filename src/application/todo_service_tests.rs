use super::todo_service::{ServiceError, TodoService, TodoServiceImpl};
use crate::domain::error::RepoError;
use crate::domain::todo::{CreateTodo, TodoId, UpdateTodo, ValidationError};
use crate::infrastructure::memory_repo::InMemoryTodoRepository;

fn service() -> (TodoServiceImpl<InMemoryTodoRepository>, InMemoryTodoRepository) {
    let repo = InMemoryTodoRepository::new();
    (TodoServiceImpl::new(repo.clone()), repo)
}

fn create(description: &str) -> CreateTodo { CreateTodo { description: description.into() } }

#[tokio::test]
async fn unit_create_and_get() {
    let (service, _) = service();
    let created = service.create(create("X")).await.unwrap();
    assert_eq!(created.description, "X");
    assert!(!created.is_done);
    let got = service.get(created.id).await.unwrap();
    assert_eq!(got, created);
}

#[tokio::test]
async fn empty_description_never_reaches_the_store() {
    let (service, repo) = service();
    let err = service.create(create("")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::EmptyDescription)));
    assert_eq!(repo.store_calls(), 0);
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_update_is_rejected_before_the_store() {
    let (service, repo) = service();
    let long = "a".repeat(101);
    let err = service.update(TodoId(1), UpdateTodo { description: long, is_done: true }).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::DescriptionTooLong)));
    assert_eq!(repo.store_calls(), 0);
}

#[tokio::test]
async fn update_returns_the_row_read_back() {
    let (service, _) = service();
    let created = service.create(create("buy milk")).await.unwrap();
    let updated = service
        .update(created.id, UpdateTodo { description: "buy oat milk".into(), is_done: true })
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "buy oat milk");
    assert!(updated.is_done);
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_creates_nothing() {
    let (service, _) = service();
    let err = service.update(TodoId(42), UpdateTodo { description: "x".into(), is_done: false }).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(RepoError::NotFound(TodoId(42)))));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_is_idempotent_and_get_demands_presence() {
    let (service, _) = service();
    let created = service.create(create("X")).await.unwrap();
    service.delete(created.id).await.unwrap();
    service.delete(created.id).await.unwrap();
    service.delete(TodoId(999)).await.unwrap();
    let err = service.get(created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(RepoError::NotFound(_))));
}

#[tokio::test]
async fn storage_failures_propagate_as_repository_errors() {
    let (service, repo) = service();
    repo.set_unavailable(true);
    let err = service.list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(RepoError::Storage(_))));
    let err = service.create(create("X")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(RepoError::Storage(_))));
}
