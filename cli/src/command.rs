//! Line commands typed at the prompt.

use todo_core::{Filter, SortKey, TodoId};

pub const HELP: &str = "\
commands:
  list [all|active|completed] [by id|title|state]
                                show todos (sorting is display-only)
  add <title>                   create a todo
  type <id> <text>              change a row's text without saving
  blur <id>                     finish editing a row (saves if changed)
  rename <id> <text>            type + blur
  done <id> | undo <id>         mark completed / active
  toggle <id>                   flip completed
  rm <id>                       delete a todo
  stats                         counts by state
  logout                        end the session
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(Filter, Option<SortKey>),
    Add(String),
    Type(TodoId, String),
    Blur(TodoId),
    Rename(TodoId, String),
    SetState(TodoId, bool),
    Toggle(TodoId),
    Remove(TodoId),
    Stats,
    Logout,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Text arguments keep their inner and trailing
    /// whitespace so the core sees exactly what was typed.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start();
        let (word, rest) = split_word(line);
        let rest_trimmed = rest.trim();

        match word {
            "list" | "ls" => parse_list(rest_trimmed),
            "add" => Ok(Command::Add(rest.to_string())),
            "type" => {
                let (id, text) = id_and_text(rest)?;
                Ok(Command::Type(id, text))
            }
            "rename" => {
                let (id, text) = id_and_text(rest)?;
                Ok(Command::Rename(id, text))
            }
            "blur" => Ok(Command::Blur(parse_id(rest_trimmed)?)),
            "done" => Ok(Command::SetState(parse_id(rest_trimmed)?, true)),
            "undo" => Ok(Command::SetState(parse_id(rest_trimmed)?, false)),
            "toggle" => Ok(Command::Toggle(parse_id(rest_trimmed)?)),
            "rm" | "delete" => Ok(Command::Remove(parse_id(rest_trimmed)?)),
            "stats" => Ok(Command::Stats),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

/// Split off the first word; the remainder drops exactly one separator.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(at) => {
            let rest = &s[at..];
            let sep = rest.chars().next().map_or(0, char::len_utf8);
            (&s[..at], &rest[sep..])
        }
        None => (s, ""),
    }
}

fn parse_list(args: &str) -> Result<Command, String> {
    let mut words = args.split_whitespace().peekable();
    let filter = match words.peek().copied() {
        Some(w) if w != "by" => {
            words.next();
            w.parse()?
        }
        _ => Filter::All,
    };
    let sort = match (words.next(), words.next()) {
        (None, _) => None,
        (Some("by"), Some(key)) => Some(key.parse()?),
        _ => return Err("usage: list [all|active|completed] [by id|title|state]".to_string()),
    };
    if words.next().is_some() {
        return Err("too many arguments to list".to_string());
    }
    Ok(Command::List(filter, sort))
}

fn parse_id(s: &str) -> Result<TodoId, String> {
    s.parse().map_err(|_| format!("expected a todo id, got `{s}`"))
}

fn id_and_text(rest: &str) -> Result<(TodoId, String), String> {
    let (id, text) = split_word(rest.trim_start());
    Ok((parse_id(id)?, text.to_string()))
}
