//! View-model for the todo list.
//!
//! # Design
//! `TodoListViewModel` owns two separate containers: the authoritative list
//! (last state confirmed by the service) and the edit buffer (unsaved titles
//! keyed by id). What a row displays is derived from both on every `render`.
//!
//! Every user action returns a `Pending`: the built request tagged with the
//! action it belongs to. The host executes it and passes the outcome to
//! `complete`. Outcomes are applied unconditionally whenever they arrive;
//! there is no per-id sequencing, so an out-of-order response for the same
//! row wins if it lands last.

use std::collections::HashMap;

use thiserror::Error;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ValidationError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{normalize_title, CreateTodo, SetState, Todo, TodoId, UpdateTitle};

pub const EMPTY_MESSAGE: &str = "No todos are available.";

/// Which action an outstanding request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Load,
    Create,
    SetState(TodoId),
    UpdateTitle(TodoId),
    Delete(TodoId),
    Logout,
}

/// A request waiting to be executed by the host.
#[derive(Debug, Clone)]
pub struct Pending {
    pub kind: PendingKind,
    pub request: HttpRequest,
}

/// Something the host must do after a completed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the application with a full-page redirect.
    Navigate(String),
}

/// Why an action could not produce a request.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TodoId,
    pub checked: bool,
    pub title: String,
    /// The row shows unsaved text.
    pub editing: bool,
}

/// Snapshot of everything the list screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub empty_message: Option<&'static str>,
    pub draft: String,
}

#[derive(Debug, Clone)]
pub struct TodoListViewModel {
    client: TodoClient,
    login_url: String,
    todos: Vec<Todo>,
    edits: HashMap<TodoId, String>,
    draft: String,
}

impl TodoListViewModel {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            login_url: config.login_url(),
            todos: Vec::new(),
            edits: HashMap::new(),
            draft: String::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Contents of the create input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Unsaved text for `id`, if the row is being edited.
    pub fn edit_text(&self, id: TodoId) -> Option<&str> {
        self.edits.get(&id).map(String::as_str)
    }

    /// Buffered text if present, else the authoritative title.
    pub fn display_title<'a>(&'a self, todo: &'a Todo) -> &'a str {
        self.edit_text(todo.id).unwrap_or(todo.title.as_str())
    }

    pub fn load(&self) -> Pending {
        tracing::debug!("loading todos");
        Pending {
            kind: PendingKind::Load,
            request: self.client.build_list_todos(),
        }
    }

    /// Validate the draft and build a create request. Nothing is sent when
    /// the trimmed draft is empty.
    pub fn create(&self) -> Result<Pending, ActionError> {
        let title = normalize_title(&self.draft)?;
        tracing::debug!(%title, "creating todo");
        let request = self.client.build_create_todo(&CreateTodo { title })?;
        Ok(Pending {
            kind: PendingKind::Create,
            request,
        })
    }

    pub fn set_state(&self, id: TodoId, state: bool) -> Result<Pending, ApiError> {
        tracing::debug!(id, state, "setting todo state");
        Ok(Pending {
            kind: PendingKind::SetState(id),
            request: self.client.build_set_state(id, &SetState { state })?,
        })
    }

    pub fn delete(&self, id: TodoId) -> Pending {
        tracing::debug!(id, "deleting todo");
        Pending {
            kind: PendingKind::Delete(id),
            request: self.client.build_delete_todo(id),
        }
    }

    pub fn begin_edit(&mut self, id: TodoId, text: impl Into<String>) {
        self.edits.insert(id, text.into());
    }

    /// End the edit session for `id`.
    ///
    /// Returns a request only when the trimmed text is non-empty and differs
    /// from the authoritative title. In every other case the buffer entry is
    /// dropped here and the row falls back to the authoritative title. When a
    /// request is returned the entry stays until `complete` runs.
    pub fn resolve_edit(&mut self, id: TodoId) -> Result<Option<Pending>, ApiError> {
        let Some(text) = self.edits.get(&id) else {
            return Ok(None);
        };
        let title = text.trim();
        let current = self.todos.iter().find(|t| t.id == id);

        let title = match current {
            Some(todo) if !title.is_empty() && todo.title != title => title.to_string(),
            _ => {
                tracing::debug!(id, "edit discarded without request");
                self.edits.remove(&id);
                return Ok(None);
            }
        };

        match self.client.build_update_title(id, &UpdateTitle { title }) {
            Ok(request) => Ok(Some(Pending {
                kind: PendingKind::UpdateTitle(id),
                request,
            })),
            Err(err) => {
                self.edits.remove(&id);
                Err(err)
            }
        }
    }

    pub fn logout(&self) -> Pending {
        Pending {
            kind: PendingKind::Logout,
            request: self.client.build_logout(),
        }
    }

    /// Merge the outcome of a request into local state.
    ///
    /// Failures leave the list untouched (an update-title failure still
    /// drops the edit buffer entry), are logged, and are returned to the host.
    pub fn complete(
        &mut self,
        kind: PendingKind,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<Option<Effect>, ApiError> {
        let result = self.apply(kind, outcome);
        if let Err(err) = &result {
            tracing::error!(action = ?kind, error = %err, "todo action failed");
        }
        result
    }

    fn apply(
        &mut self,
        kind: PendingKind,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<Option<Effect>, ApiError> {
        let client = &self.client;
        match kind {
            PendingKind::Load => {
                self.todos = outcome.and_then(|r| client.parse_list_todos(r))?;
            }
            PendingKind::Create => {
                let todo = outcome.and_then(|r| client.parse_create_todo(r))?;
                self.todos.push(todo);
                self.draft.clear();
            }
            PendingKind::SetState(id) => {
                let echo = outcome.and_then(|r| client.parse_set_state(r))?;
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                    todo.state = echo.state;
                }
            }
            PendingKind::UpdateTitle(id) => {
                let parsed = outcome.and_then(|r| client.parse_update_title(r));
                self.edits.remove(&id);
                let echo = parsed?;
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                    todo.title = echo.title;
                }
            }
            PendingKind::Delete(id) => {
                outcome.and_then(|r| client.parse_delete_todo(r))?;
                self.todos.retain(|t| t.id != id);
                self.edits.remove(&id);
            }
            PendingKind::Logout => {
                outcome.and_then(|r| client.parse_logout(r))?;
                return Ok(Some(Effect::Navigate(self.login_url.clone())));
            }
        }
        Ok(None)
    }

    /// Build a fresh snapshot. Row titles are recomputed from the buffer and
    /// the list on every call.
    pub fn render(&self) -> ListView {
        let rows = self
            .todos
            .iter()
            .map(|todo| RowView {
                id: todo.id,
                checked: todo.state,
                title: self.display_title(todo).to_string(),
                editing: self.edits.contains_key(&todo.id),
            })
            .collect::<Vec<_>>();
        ListView {
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
            draft: self.draft.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm() -> TodoListViewModel {
        TodoListViewModel::new(&ClientConfig::default())
    }

    fn ok(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(200, body))
    }

    fn server_error() -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(500, "boom"))
    }

    fn offline() -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    fn loaded(body: &str) -> TodoListViewModel {
        let mut vm = vm();
        let pending = vm.load();
        vm.complete(pending.kind, ok(body)).unwrap();
        vm
    }

    fn three() -> TodoListViewModel {
        loaded(
            r#"{"todos":[
                {"id":1,"title":"One","state":false},
                {"id":2,"title":"Two","state":false},
                {"id":3,"title":"Three","state":true}
            ]}"#,
        )
    }

    fn body_json(pending: &Pending) -> serde_json::Value {
        serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn load_renders_one_row_per_todo() {
        let vm = three();
        let view = vm.render();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.rows[2].title, "Three");
        assert!(view.rows[2].checked);
    }

    #[test]
    fn empty_load_shows_message() {
        let vm = loaded(r#"{"todos":[]}"#);
        let view = vm.render();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some("No todos are available."));
    }

    #[test]
    fn load_failure_keeps_prior_list() {
        let mut vm = three();
        let pending = vm.load();
        assert!(vm.complete(pending.kind, server_error()).is_err());
        assert!(vm.complete(PendingKind::Load, offline()).is_err());
        assert_eq!(vm.todos().len(), 3);
    }

    #[test]
    fn load_replaces_without_merge() {
        let mut vm = three();
        vm.complete(
            PendingKind::Load,
            ok(r#"{"todos":[{"id":9,"title":"Nine","state":false}]}"#),
        )
        .unwrap();
        let ids: Vec<_> = vm.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn whitespace_create_is_rejected_locally() {
        let mut vm = vm();
        vm.set_draft("  ");
        let err = vm.create().unwrap_err();
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(err.to_string(), "Please enter a todo title");
        assert_eq!(vm.draft(), "  ");
    }

    #[test]
    fn long_create_is_sent_to_the_service() {
        let mut vm = vm();
        vm.set_draft("x".repeat(201));
        let pending = vm.create().unwrap();
        assert_eq!(pending.kind, PendingKind::Create);
        assert_eq!(
            body_json(&pending),
            serde_json::json!({"title": "x".repeat(201)})
        );
    }

    #[test]
    fn long_create_rejected_by_service_changes_nothing() {
        let mut vm = three();
        let draft = "x".repeat(201);
        vm.set_draft(draft.clone());
        let pending = vm.create().unwrap();
        let outcome = Ok(HttpResponse::new(400, r#"{"error":"Title is too long"}"#));
        assert!(matches!(
            vm.complete(pending.kind, outcome),
            Err(ApiError::HttpError { status: 400, .. })
        ));
        assert_eq!(vm.todos().len(), 3);
        assert_eq!(vm.draft(), draft);
    }

    #[test]
    fn create_success_appends_and_clears_input() {
        let mut vm = vm();
        vm.set_draft("  Buy milk ");
        let pending = vm.create().unwrap();
        assert_eq!(body_json(&pending), serde_json::json!({"title": "Buy milk"}));

        vm.complete(
            pending.kind,
            Ok(HttpResponse::new(
                201,
                r#"{"id":1,"title":"Buy milk","state":false}"#,
            )),
        )
        .unwrap();
        let view = vm.render();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, 1);
        assert_eq!(view.draft, "");
    }

    #[test]
    fn create_appends_at_end() {
        let mut vm = three();
        vm.set_draft("Four");
        let pending = vm.create().unwrap();
        vm.complete(pending.kind, ok(r#"{"id":0,"title":"Four","state":false}"#)).unwrap();
        assert_eq!(vm.todos().last().map(|t| t.id), Some(0));
    }

    #[test]
    fn create_failure_keeps_input() {
        let mut vm = vm();
        vm.set_draft("Buy milk");
        let pending = vm.create().unwrap();
        assert!(vm.complete(pending.kind, server_error()).is_err());
        let view = vm.render();
        assert!(view.rows.is_empty());
        assert_eq!(view.draft, "Buy milk");
    }

    #[test]
    fn set_state_updates_only_matching_row() {
        let mut vm = three();
        let pending = vm.set_state(1, true).unwrap();
        assert_eq!(pending.kind, PendingKind::SetState(1));
        assert_eq!(body_json(&pending), serde_json::json!({"state": true}));

        vm.complete(pending.kind, ok(r#"{"id":1,"title":"One","state":true}"#)).unwrap();
        let checked: Vec<_> = vm.render().rows.iter().map(|r| r.checked).collect();
        assert_eq!(checked, vec![true, false, true]);
    }

    #[test]
    fn set_state_trusts_server_echo() {
        let mut vm = three();
        let pending = vm.set_state(2, true).unwrap();
        vm.complete(pending.kind, ok(r#"{"id":2,"title":"Two","state":false}"#)).unwrap();
        assert!(!vm.todo(2).unwrap().state);
    }

    #[test]
    fn set_state_failure_changes_nothing() {
        let mut vm = three();
        let pending = vm.set_state(1, true).unwrap();
        assert!(vm.complete(pending.kind, offline()).is_err());
        assert!(!vm.todo(1).unwrap().state);
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let mut vm = three();
        let pending = vm.delete(2);
        assert!(pending.request.body.is_none());
        vm.complete(pending.kind, ok(r#"{"message":"deleted"}"#)).unwrap();
        let ids: Vec<_> = vm.render().rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn delete_failure_keeps_all_rows() {
        let mut vm = three();
        let pending = vm.delete(2);
        assert!(matches!(
            vm.complete(pending.kind, Ok(HttpResponse::new(404, ""))),
            Err(ApiError::NotFound)
        ));
        assert_eq!(vm.todos().len(), 3);
    }

    #[test]
    fn buffered_text_overrides_display() {
        let mut vm = three();
        vm.begin_edit(1, "On");
        let row = &vm.render().rows[0];
        assert_eq!(row.title, "On");
        assert!(row.editing);
        assert_eq!(vm.todo(1).unwrap().title, "One");
    }

    #[test]
    fn resolve_without_edit_is_noop() {
        let mut vm = three();
        assert!(vm.resolve_edit(1).unwrap().is_none());
    }

    #[test]
    fn resolve_unchanged_title_sends_nothing() {
        let mut vm = three();
        vm.begin_edit(1, "  One ");
        assert!(vm.resolve_edit(1).unwrap().is_none());
        assert_eq!(vm.edit_text(1), None);
    }

    #[test]
    fn resolve_blank_reverts_to_authoritative() {
        let mut vm = three();
        vm.begin_edit(2, "   ");
        assert!(vm.resolve_edit(2).unwrap().is_none());
        let row = &vm.render().rows[1];
        assert_eq!(row.title, "Two");
        assert!(!row.editing);
    }

    #[test]
    fn resolve_unknown_id_discards() {
        let mut vm = three();
        vm.begin_edit(42, "Ghost");
        assert!(vm.resolve_edit(42).unwrap().is_none());
        assert_eq!(vm.edit_text(42), None);
    }

    #[test]
    fn resolve_changed_title_sends_trimmed_text() {
        let mut vm = three();
        vm.begin_edit(1, " Uno ");
        let pending = vm.resolve_edit(1).unwrap().unwrap();
        assert_eq!(pending.kind, PendingKind::UpdateTitle(1));
        assert_eq!(pending.request.path, "/1/update_title");
        assert_eq!(body_json(&pending), serde_json::json!({"title": "Uno"}));
        // Still showing the unsaved text while the request is outstanding.
        assert_eq!(vm.render().rows[0].title, " Uno ");

        vm.complete(pending.kind, ok(r#"{"id":1,"title":"Uno","state":false}"#)).unwrap();
        let row = &vm.render().rows[0];
        assert_eq!(row.title, "Uno");
        assert!(!row.editing);
    }

    #[test]
    fn resolve_failure_falls_back_to_old_title() {
        let mut vm = three();
        vm.begin_edit(3, "Tres");
        let pending = vm.resolve_edit(3).unwrap().unwrap();
        assert!(vm.complete(pending.kind, server_error()).is_err());
        let row = &vm.render().rows[2];
        assert_eq!(row.title, "Three");
        assert!(!row.editing);
    }

    #[test]
    fn late_response_applies_after_new_edit() {
        let mut vm = three();
        vm.begin_edit(1, "First");
        let pending = vm.resolve_edit(1).unwrap().unwrap();
        vm.begin_edit(1, "Second");
        vm.complete(pending.kind, ok(r#"{"title":"First"}"#)).unwrap();
        assert_eq!(vm.todo(1).unwrap().title, "First");
        assert_eq!(vm.edit_text(1), None);
    }

    #[test]
    fn logout_success_navigates() {
        let mut vm = three();
        let pending = vm.logout();
        assert_eq!(pending.request.path, "/logout/");
        let effect = vm.complete(pending.kind, ok("{}")).unwrap();
        assert_eq!(effect, Some(Effect::Navigate("/login/".to_string())));
    }

    #[test]
    fn logout_failure_stays() {
        let mut vm = three();
        let pending = vm.logout();
        assert!(vm.complete(pending.kind, offline()).is_err());
        assert_eq!(vm.todos().len(), 3);
    }

    #[test]
    fn end_to_end_scenario() {
        let mut vm = loaded(r#"{"todos":[]}"#);
        assert_eq!(vm.render().empty_message, Some(EMPTY_MESSAGE));

        vm.set_draft("Task A");
        let pending = vm.create().unwrap();
        vm.complete(pending.kind, ok(r#"{"id":7,"title":"Task A","state":false}"#)).unwrap();
        let view = vm.render();
        assert_eq!(
            view.rows,
            vec![RowView {
                id: 7,
                checked: false,
                title: "Task A".to_string(),
                editing: false,
            }]
        );

        vm.begin_edit(7, "Task B");
        let pending = vm.resolve_edit(7).unwrap().unwrap();
        assert_eq!(body_json(&pending), serde_json::json!({"title": "Task B"}));
        vm.complete(pending.kind, ok(r#"{"id":7,"title":"Task B","state":false}"#)).unwrap();
        assert_eq!(vm.render().rows[0].title, "Task B");

        let pending = vm.set_state(7, true).unwrap();
        assert_eq!(body_json(&pending), serde_json::json!({"state": true}));
        vm.complete(pending.kind, ok(r#"{"id":7,"title":"Task B","state":true}"#)).unwrap();
        assert!(vm.render().rows[0].checked);

        let pending = vm.delete(7);
        assert_eq!(pending.request.path, "/7/delete");
        vm.complete(pending.kind, ok("{}")).unwrap();
        assert_eq!(vm.render().empty_message, Some(EMPTY_MESSAGE));
    }
}
