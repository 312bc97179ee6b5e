//! Stateless HTTP request builder and response parser for the todo service.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status is accepted; the service is not consistent about 200 vs 201.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateTodo, SetState, StateChanged, TitleChanged, Todo, TodoId, TodoList, UpdateTitle,
};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the todo service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/".to_string())
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.with_json("/".to_string(), input)
    }

    pub fn build_set_state(&self, id: TodoId, input: &SetState) -> Result<HttpRequest, ApiError> {
        self.with_json(format!("/{id}/set_state"), input)
    }

    pub fn build_update_title(
        &self,
        id: TodoId,
        input: &UpdateTitle,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(format!("/{id}/update_title"), input)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        self.bare(HttpMethod::Post, format!("/{id}/delete"))
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.bare(HttpMethod::Post, "/logout/".to_string())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        let list: TodoList = parse_json(response)?;
        Ok(list.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_set_state(&self, response: HttpResponse) -> Result<StateChanged, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_title(&self, response: HttpResponse) -> Result<TitleChanged, ApiError> {
        parse_json(response)
    }

    /// Only the status matters; the body is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Only the status matters; the body is ignored.
    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
        }
    }

    fn with_json<T: Serialize>(&self, path: String, input: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.bare(HttpMethod::Post, path);
        req.headers
            .push(("content-type".to_string(), JSON.to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
