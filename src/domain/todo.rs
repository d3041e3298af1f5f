use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Store-assigned identifier. Never supplied by a client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub is_done: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub description: String,
}

/// Full overwrite of the mutable fields; `id` stays as it is.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub description: String,
    #[serde(default)]
    pub is_done: bool,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description: non zero value required")]
    EmptyDescription,
    #[error("description: must not exceed 100 characters")]
    DescriptionTooLong,
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), ValidationError> { validate_description(&self.description) }
}

impl UpdateTodo {
    pub fn validate(&self) -> Result<(), ValidationError> { validate_description(&self.description) }
}
