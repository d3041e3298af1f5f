use thiserror::Error;

use super::todo::TodoId;

/// Failures a repository can report. Validation never originates here.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}
