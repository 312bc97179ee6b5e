//! Read-only helpers over a slice of todos: filtering, counts, sorting and a
//! one-line display form. None of these touch the view-model's cached order.

use std::str::FromStr;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        self.matches_state(todo.state)
    }

    pub fn matches_state(&self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !completed,
            Filter::Completed => completed,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

pub fn filter_todos(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

pub fn todo_stats(todos: &[Todo]) -> TodoStats {
    let completed = todos.iter().filter(|t| t.state).count();
    TodoStats {
        total: todos.len(),
        completed,
        active: todos.len() - completed,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Title,
    /// Active before completed.
    State,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "state" => Ok(SortKey::State),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sorted copy of `todos`. Stable, so ties keep their list order.
pub fn sorted_todos(todos: &[Todo], key: SortKey) -> Vec<Todo> {
    let mut out = todos.to_vec();
    match key {
        SortKey::Id => out.sort_by_key(|t| t.id),
        SortKey::Title => out.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::State => out.sort_by_key(|t| t.state),
    }
    out
}

pub fn status_glyph(completed: bool) -> char {
    if completed {
        '✓'
    } else {
        '○'
    }
}

pub fn format_for_display(todo: &Todo) -> String {
    format!("{} {}", status_glyph(todo.state), todo.title)
}
