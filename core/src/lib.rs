//! Sans-IO client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! `TodoClient` sits `TodoListViewModel`, which owns the cached list and the
//! per-row edit buffer and turns user actions into exactly one request each.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - The view-model hands out `Pending` requests and merges outcomes in
//!   `complete`; the host decides how and when to execute them.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;
pub mod view_model;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{Filter, SortKey, TodoStats};
pub use types::{CreateTodo, SetState, Todo, TodoId, TodoList, UpdateTitle};
pub use view_model::{
    ActionError, Effect, ListView, Pending, PendingKind, RowView, TodoListViewModel,
};
