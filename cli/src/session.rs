//! Drives the view-model from typed commands.
//!
//! The session executes each `Pending` immediately through its transport and
//! merges the outcome before reading the next line. Failed actions were
//! already logged by the view-model; apart from the initial load, the only
//! visible result is that the list does not change.

use std::io::Write;

use anyhow::Result;
use todo_core::query::todo_stats;
use todo_core::{
    ActionError, ApiError, ClientConfig, Effect, Filter, Pending, TodoId, TodoListViewModel,
};

use crate::command::{Command, HELP};
use crate::render::{render_list, render_stats};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<T> {
    vm: TodoListViewModel,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            vm: TodoListViewModel::new(config),
            transport,
        }
    }

    #[cfg(test)]
    pub fn view_model(&self) -> &TodoListViewModel {
        &self.vm
    }

    /// Initial load. Its failure is the one error shown to the user.
    pub fn start(&mut self, out: &mut impl Write) -> Result<()> {
        let pending = self.vm.load();
        if let Err(err) = self.dispatch(pending) {
            writeln!(out, "Could not load todos: {err}")?;
        }
        write!(out, "{}", render_list(&self.vm, Filter::All, None))?;
        Ok(())
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::List(filter, sort) => {
                write!(out, "{}", render_list(&self.vm, filter, sort))?;
                return Ok(Flow::Continue);
            }
            Command::Add(text) => {
                self.vm.set_draft(text);
                match self.vm.create() {
                    Ok(pending) => self.fire(pending),
                    Err(ActionError::Validation(notice)) => {
                        writeln!(out, "{notice}")?;
                        return Ok(Flow::Continue);
                    }
                    Err(ActionError::Api(err)) => self.report(err),
                }
            }
            Command::Type(id, text) => self.vm.begin_edit(id, text),
            Command::Blur(id) => self.blur(id),
            Command::Rename(id, text) => {
                self.vm.begin_edit(id, text);
                self.blur(id);
            }
            Command::SetState(id, state) => self.set_state(id, state),
            Command::Toggle(id) => match self.vm.todo(id).map(|t| t.state) {
                Some(state) => self.set_state(id, !state),
                None => {
                    writeln!(out, "no todo with id {id}")?;
                    return Ok(Flow::Continue);
                }
            },
            Command::Remove(id) => {
                let pending = self.vm.delete(id);
                self.fire(pending);
            }
            Command::Stats => {
                writeln!(out, "{}", render_stats(&todo_stats(self.vm.todos())))?;
                return Ok(Flow::Continue);
            }
            Command::Logout => {
                let pending = self.vm.logout();
                if let Ok(Some(Effect::Navigate(url))) = self.dispatch(pending) {
                    writeln!(out, "Logged out. Continue at {url}")?;
                    return Ok(Flow::Exit);
                }
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Exit),
        }
        write!(out, "{}", render_list(&self.vm, Filter::All, None))?;
        Ok(Flow::Continue)
    }

    fn blur(&mut self, id: TodoId) {
        match self.vm.resolve_edit(id) {
            Ok(Some(pending)) => self.fire(pending),
            Ok(None) => {}
            Err(err) => self.report(err),
        }
    }

    fn set_state(&mut self, id: TodoId, state: bool) {
        match self.vm.set_state(id, state) {
            Ok(pending) => self.fire(pending),
            Err(err) => self.report(err),
        }
    }

    fn dispatch(&mut self, pending: Pending) -> Result<Option<Effect>, ApiError> {
        let outcome = self.transport.execute(pending.request);
        self.vm.complete(pending.kind, outcome)
    }

    /// Dispatch where failure has no visible feedback.
    fn fire(&mut self, pending: Pending) {
        // `complete` has already logged the failure at error level.
        if let Err(err) = self.dispatch(pending) {
            tracing::debug!(error = %err, "action failed, list unchanged");
        }
    }

    fn report(&self, err: ApiError) {
        tracing::error!(error = %err, "could not build request");
    }
}
