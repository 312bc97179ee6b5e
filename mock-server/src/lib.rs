use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub state: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct SetState {
    pub state: bool,
}

#[derive(Deserialize)]
pub struct UpdateTitle {
    pub title: String,
}

/// Todos in creation order; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    todos: Vec<Todo>,
}

impl Store {
    fn get_mut(&mut self, id: i64) -> Result<&mut Todo, ApiError> {
        self.todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error responses carry `{"error": ...}` like the real service.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(&'static str),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Todo not found"),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}/set_state", post(set_state))
        .route("/{id}/update_title", post(update_title))
        .route("/{id}/delete", post(delete_todo))
        .route("/logout/", post(logout))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Unwrap a JSON body. Syntax errors and missing content types are "Invalid
/// JSON"; a well-formed body with the wrong shape gets `missing`.
fn body<T>(payload: Result<Json<T>, JsonRejection>, missing: &'static str) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonDataError(_)) => Err(ApiError::BadRequest(missing)),
        Err(_) => Err(ApiError::BadRequest("Invalid JSON")),
    }
}

fn clean_title(raw: &str) -> Result<String, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::BadRequest("Title is too long"));
    }
    Ok(title.to_string())
}

/// Newest first.
async fn list_todos(State(db): State<Db>) -> Json<TodoList> {
    let store = db.read().await;
    Json(TodoList {
        todos: store.todos.iter().rev().cloned().collect(),
    })
}

async fn create_todo(
    State(db): State<Db>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = clean_title(&body(payload, "Title is required")?.title)?;
    let mut store = db.write().await;
    store.last_id += 1;
    let todo = Todo {
        id: store.last_id,
        title,
        state: false,
    };
    store.todos.push(todo.clone());
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn set_state(
    State(db): State<Db>,
    Path(id): Path<i64>,
    payload: Result<Json<SetState>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = db.write().await;
    let todo = store.get_mut(id)?;
    todo.state = body(payload, "State is required")?.state;
    tracing::debug!(id, state = todo.state, "todo state set");
    Ok(Json(todo.clone()))
}

async fn update_title(
    State(db): State<Db>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTitle>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = db.write().await;
    let todo = store.get_mut(id)?;
    todo.title = clean_title(&body(payload, "Title is required")?.title)?;
    tracing::debug!(id, "todo renamed");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let before = store.todos.len();
    store.todos.retain(|t| t.id != id);
    if store.todos.len() == before {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "todo deleted");
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}

async fn logout() -> Json<Value> {
    tracing::info!("session logged out");
    Json(json!({ "message": "You have been logged out successfully." }))
}
