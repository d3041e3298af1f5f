use axum::{routing::get, Router};

use crate::application::todo_service::TodoService;
use crate::http::routes::todos::{self, AppState};

/// Full application router: `/health` plus the todo resource.
pub fn app<S: TodoService + Clone>(service: S) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(todos::router(AppState { service }))
}
