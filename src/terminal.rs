//! Read-dispatch-report loop over a line editor.

use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use crossterm::style::Stylize;

use crate::error::ShellError;
use crate::escape::split_input;

mod command;
pub use self::command::{ArgCompleter, Command, CommandDef, Registry};

mod complete;
pub use self::complete::{Completion, complete};

mod editor;
pub use self::editor::{RustylineEditor, ShellHelper};

/// The environment commands run in.
pub trait Context {
    fn startup(&mut self) -> Result<()>;

    /// The loop keeps prompting while this holds.
    fn alive(&self) -> bool;

    fn prompt(&self) -> String;

    fn shutdown(&mut self) -> Result<()>;
}

#[derive(Debug)]
pub enum ReadError {
    /// The user interrupted input; the loop ends without reporting.
    Aborted,
    Failed(anyhow::Error),
}

pub trait LineEditor {
    fn read_line(&mut self, prompt: &str) -> std::result::Result<String, ReadError>;

    fn append_history(&mut self, line: &str);
}

/// Context and commands, shared between the loop and the editor's
/// completion hook.
///
/// Both run on the one control thread and completion only fires while the
/// loop is blocked in `read_line`, so the `RefCell` borrows never overlap.
pub struct ShellState<C> {
    ctx: RefCell<C>,
    registry: RefCell<Registry<C>>,
}

impl<C> ShellState<C> {
    pub fn new(ctx: C) -> Rc<Self> {
        Rc::new(Self {
            ctx: RefCell::new(ctx),
            registry: RefCell::new(Registry::default()),
        })
    }

    pub fn register(&self, cmd: Box<dyn Command<C>>) {
        self.registry.borrow_mut().register(cmd);
    }

    pub fn with_ctx<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.ctx.borrow_mut())
    }

    pub fn with_registry<R>(&self, f: impl FnOnce(&Registry<C>) -> R) -> R {
        f(&self.registry.borrow())
    }

    /// Split `line` and run the named command with the remaining fields.
    /// Blank lines do nothing.
    pub fn dispatch(&self, line: &str) -> Result<()> {
        let fields = split_input(line);
        let Some((name, args)) = fields.split_first() else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }

        let registry = self.registry.borrow();
        let cmd = registry
            .get(name)
            .ok_or_else(|| ShellError::CommandNotFound(name.clone()))?;
        tracing::debug!(command = %name, args = args.len(), "dispatch");
        cmd.exec(&mut self.ctx.borrow_mut(), args)
    }

    pub fn complete(&self, line: &str, cursor: usize) -> Completion {
        let registry = self.registry.borrow();
        complete(&registry, &mut self.ctx.borrow_mut(), line, cursor)
    }
}

pub struct Terminal<C, E> {
    state: Rc<ShellState<C>>,
    editor: E,
    err_out: Box<dyn Write>,
    /// Colour the error label only when `err_out` is a terminal.
    err_tty: bool,
}

impl<C: Context> Terminal<C, RustylineEditor<C>> {
    /// A terminal reading from the controlling TTY.
    pub fn interactive(ctx: C, history_file: Option<std::path::PathBuf>) -> Result<Self> {
        let state = ShellState::new(ctx);
        let editor = RustylineEditor::new(state.clone(), history_file)?;
        Ok(Self::with_editor(state, editor))
    }
}

impl<C: Context, E: LineEditor> Terminal<C, E> {
    pub fn with_editor(state: Rc<ShellState<C>>, editor: E) -> Self {
        Self {
            state,
            editor,
            err_out: Box::new(std::io::stderr()),
            err_tty: std::io::stderr().is_terminal(),
        }
    }

    /// Send error reports somewhere other than stderr.
    pub fn with_error_output(mut self, out: Box<dyn Write>) -> Self {
        self.err_out = out;
        self.err_tty = false;
        self
    }

    pub fn register(&self, cmd: Box<dyn Command<C>>) {
        self.state.register(cmd);
    }

    pub fn state(&self) -> &Rc<ShellState<C>> {
        &self.state
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Run until the user aborts input or the context stops being alive.
    /// The result is the shutdown step's result.
    pub fn run(&mut self) -> Result<()> {
        self.state.with_ctx(|ctx| ctx.startup()).context("startup")?;

        loop {
            let (alive, prompt) = self.state.with_ctx(|ctx| (ctx.alive(), ctx.prompt()));
            if !alive {
                break;
            }
            match self.editor.read_line(&prompt) {
                Ok(line) => {
                    if let Err(err) = self.state.dispatch(&line) {
                        self.report(&err);
                    }
                    self.editor.append_history(&line);
                }
                Err(ReadError::Aborted) => {
                    tracing::debug!("input aborted");
                    break;
                }
                Err(ReadError::Failed(err)) => self.report(&err),
            }
        }

        self.state.with_ctx(|ctx| ctx.shutdown())
    }

    fn report(&mut self, err: &anyhow::Error) {
        let label = if self.err_tty {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        writeln!(self.err_out, "{} {:#}", label, err).ok();
    }
}

#[cfg(test)]
#[path = "tests/terminal/terminal_tests.rs"]
mod tests;
