use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::todo_service::ServiceError;
use crate::domain::error::RepoError;

/// Body of every failure response that carries a payload.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody { pub detail: String }

#[derive(Debug)]
pub enum ApiError {
    /// Malformed request or a value that failed validation.
    BadRequest(String),
    NotFound,
    /// The store could not serve the request. The detail is generic; the
    /// underlying error is only logged.
    Unavailable(&'static str),
}

impl ApiError {
    pub fn from_service(err: ServiceError, unavailable_detail: &'static str) -> Self {
        match err {
            ServiceError::Validation(e) => {
                tracing::warn!(error = %e, "rejected invalid todo");
                ApiError::BadRequest(e.to_string())
            }
            ServiceError::Repository(RepoError::NotFound(id)) => {
                tracing::debug!(%id, "todo not found");
                ApiError::NotFound
            }
            ServiceError::Repository(RepoError::Storage(source)) => {
                tracing::error!(error = %source, detail = unavailable_detail, "storage failure");
                ApiError::Unavailable(unavailable_detail)
            }
        }
    }
}

pub const INVALID_BODY: &str = "Error parsing data.";

/// Request body accepted either as JSON or as an urlencoded form, chosen by
/// `Content-Type`. Any rejection becomes a 400 with a `detail` payload.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let parsed = if is_form {
            Form::<T>::from_request(req, state).await.map(|Form(value)| value).map_err(|e| e.to_string())
        } else {
            Json::<T>::from_request(req, state).await.map(|Json(value)| value).map_err(|e| e.to_string())
        };
        parsed.map(JsonOrForm).map_err(|error| {
            tracing::warn!(%error, "rejected request body");
            ApiError::BadRequest(INVALID_BODY.into())
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, axum::Json(ErrorBody { detail })).into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Unavailable(detail) => {
                (StatusCode::SERVICE_UNAVAILABLE, axum::Json(ErrorBody { detail: detail.into() })).into_response()
            }
        }
    }
}
