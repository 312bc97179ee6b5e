//! Plain-text rendering of the list screen.

use std::fmt::Write;

use todo_core::query::{filter_todos, format_for_display, sorted_todos, TodoStats};
use todo_core::{Filter, SortKey, Todo, TodoListViewModel};

/// Render the current list. Sorting only changes what is printed.
pub fn render_list(vm: &TodoListViewModel, filter: Filter, sort: Option<SortKey>) -> String {
    if let Some(message) = vm.render().empty_message {
        return format!("{message}\n");
    }

    let mut todos: Vec<Todo> = filter_todos(vm.todos(), filter)
        .into_iter()
        .cloned()
        .collect();
    if let Some(key) = sort {
        todos = sorted_todos(&todos, key);
    }

    if todos.is_empty() {
        return "(no matching todos)\n".to_string();
    }
    let mut out = String::new();
    for todo in &todos {
        let _ = writeln!(out, "{}", render_row(vm, todo));
    }
    out
}

/// One line per todo, showing unsaved text in place of the saved title.
pub fn render_row(vm: &TodoListViewModel, todo: &Todo) -> String {
    let shown = Todo {
        title: vm.display_title(todo).to_string(),
        ..todo.clone()
    };
    let unsaved = if vm.edit_text(todo.id).is_some() { "  (unsaved)" } else { "" };
    format!("{:>4}  {}{unsaved}", todo.id, format_for_display(&shown))
}

pub fn render_stats(stats: &TodoStats) -> String {
    format!(
        "{} total, {} active, {} completed",
        stats.total, stats.active, stats.completed
    )
}
