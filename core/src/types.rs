//! Wire DTOs for the todo service.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently so
//! schema drift shows up in the integration tests. Echo types only require
//! the field the client actually consumes; serde ignores the rest.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Server-assigned todo identifier.
pub type TodoId = i64;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub state: bool,
}

/// Body of a successful list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for toggling a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetState {
    pub state: bool,
}

/// Request payload for renaming a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTitle {
    pub title: String,
}

/// The part of a set-state response the client applies.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StateChanged {
    pub state: bool,
}

/// The part of an update-title response the client applies.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TitleChanged {
    pub title: String,
}

/// Trim `raw`; a title that is empty after trimming is rejected. Length
/// limits belong to the service.
pub fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
