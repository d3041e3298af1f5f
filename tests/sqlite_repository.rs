use todo_api::domain::error::RepoError;
use todo_api::domain::repository::TodoRepository;
use todo_api::domain::todo::{CreateTodo, TodoId, UpdateTodo};
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

async fn repo() -> SqliteTodoRepository {
    let repo = SqliteTodoRepository::connect("sqlite::memory:", 1).await.unwrap();
    repo.init().await.unwrap();
    repo
}

fn create(description: &str) -> CreateTodo { CreateTodo { description: description.into() } }

#[tokio::test]
async fn created_row_reads_back_unchanged() {
    let repo = repo().await;
    for description in ["buy milk", "ünïcödé", "  padded  "] {
        let created = repo.create(create(description)).await.unwrap();
        let got = repo.get(created.id).await.unwrap();
        assert_eq!(got, created);
        assert_eq!(got.description, description);
        assert!(!got.is_done);
    }
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
    let repo = repo().await;
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let repo = repo().await;
    repo.create(create("x")).await.unwrap();
    let err = repo.get(TodoId(999)).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(TodoId(999))));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let repo = repo().await;
    let created = repo.create(create("x")).await.unwrap();
    repo.delete(created.id).await.unwrap();
    repo.delete(created.id).await.unwrap();
    repo.delete(TodoId(12345)).await.unwrap();
    assert!(matches!(repo.get(created.id).await, Err(RepoError::NotFound(id)) if id == created.id));
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = repo().await;
    let first = repo.create(create("a")).await.unwrap();
    repo.delete(first.id).await.unwrap();
    let second = repo.create(create("b")).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn update_overwrites_fields() {
    let repo = repo().await;
    let created = repo.create(create("before")).await.unwrap();
    repo.update(created.id, UpdateTodo { description: "after".into(), is_done: true }).await.unwrap();
    let got = repo.get(created.id).await.unwrap();
    assert_eq!(got.id, created.id);
    assert_eq!(got.description, "after");
    assert!(got.is_done);
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let repo = repo().await;
    let err = repo.update(TodoId(3), UpdateTodo { description: "x".into(), is_done: true }).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(TodoId(3))));
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn file_backed_database_persists_across_connections() {
    let dir = std::env::temp_dir().join(format!("todo-api-test-{}", std::process::id()));
    let path = dir.join("nested").join("todos.db");
    let url = format!("sqlite://{}", path.display());

    let first = SqliteTodoRepository::connect(&url, 2).await.unwrap();
    first.init().await.unwrap();
    let created = first.create(create("persisted")).await.unwrap();
    drop(first);

    let second = SqliteTodoRepository::connect(&url, 2).await.unwrap();
    second.init().await.unwrap();
    assert_eq!(second.get(created.id).await.unwrap().description, "persisted");

    let _ = std::fs::remove_dir_all(dir);
}
