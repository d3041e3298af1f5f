use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use crate::application::todo_service::TodoService;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::http::types::{ApiError, JsonOrForm};

pub const INVALID_ID: &str = "ID must be integer.";
pub const LIST_UNAVAILABLE: &str = "Error connecting to the database.";
pub const CREATE_UNAVAILABLE: &str = "Database error.";
pub const GET_UNAVAILABLE: &str = "Failed to fetch object.";
pub const UPDATE_UNAVAILABLE: &str = "Failed to update object.";
pub const DELETE_UNAVAILABLE: &str = "DB error response.";

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/:id",
            get(get_todo::<S>).post(update_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>),
        )
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.service.list().await.map_err(|e| ApiError::from_service(e, LIST_UNAVAILABLE))?;
    Ok(Json(todos))
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    JsonOrForm(input): JsonOrForm<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.service.create(input).await.map_err(|e| ApiError::from_service(e, CREATE_UNAVAILABLE))?;
    tracing::info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(id)?;
    let todo = state.service.get(id).await.map_err(|e| ApiError::from_service(e, GET_UNAVAILABLE))?;
    Ok(Json(todo))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    JsonOrForm(input): JsonOrForm<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(id)?;
    let todo = state.service.update(id, input).await.map_err(|e| ApiError::from_service(e, UPDATE_UNAVAILABLE))?;
    Ok(Json(todo))
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id)?;
    state.service.delete(id).await.map_err(|e| ApiError::from_service(e, DELETE_UNAVAILABLE))?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<TodoId, ApiError> {
    let invalid = || ApiError::BadRequest(INVALID_ID.into());
    let Path(raw) = path.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected undecodable id");
        invalid()
    })?;
    raw.parse::<i64>().map(TodoId).map_err(|_| {
        tracing::warn!(id = %raw, "rejected non-integer id");
        invalid()
    })
}
