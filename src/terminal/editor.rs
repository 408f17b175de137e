use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Editor, Helper};

use super::{LineEditor, ReadError, ShellState};

/// Bridges rustyline's completion hook to [`ShellState::complete`].
pub struct ShellHelper<C> {
    state: Rc<ShellState<C>>,
}

impl<C> Completer for ShellHelper<C> {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // rustyline reports a byte offset; completion works on chars.
        let cursor = line[..pos].chars().count();
        let completion = self.state.complete(line, cursor);
        let pairs = completion
            .candidates
            .into_iter()
            .map(|c| Pair {
                replacement: format!("{}{}", completion.head, c),
                display: c,
            })
            .collect();
        // Everything left of the cursor is replaced; rustyline keeps the rest.
        Ok((0, pairs))
    }
}

impl<C> Hinter for ShellHelper<C> {
    type Hint = String;
}

impl<C> Highlighter for ShellHelper<C> {}

impl<C> Validator for ShellHelper<C> {}

impl<C> Helper for ShellHelper<C> {}

pub struct RustylineEditor<C> {
    editor: Editor<ShellHelper<C>, DefaultHistory>,
    history_file: Option<PathBuf>,
}

impl<C> RustylineEditor<C> {
    pub fn new(state: Rc<ShellState<C>>, history_file: Option<PathBuf>) -> Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config).context("create line editor")?;
        editor.set_helper(Some(ShellHelper { state }));

        if let Some(path) = &history_file {
            if let Err(err) = editor.load_history(path) {
                tracing::debug!(path = %path.display(), error = %err, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }

    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history_file else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        self.editor
            .save_history(path)
            .with_context(|| format!("save history {}", path.display()))
    }
}

impl<C> LineEditor for RustylineEditor<C> {
    fn read_line(&mut self, prompt: &str) -> std::result::Result<String, ReadError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(ReadError::Aborted),
            Err(err) => Err(ReadError::Failed(anyhow::anyhow!("read line: {}", err))),
        }
    }

    fn append_history(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %err, "append history");
        }
    }
}

impl<C> Drop for RustylineEditor<C> {
    fn drop(&mut self) {
        if let Err(err) = self.save_history() {
            tracing::warn!(error = %format!("{:#}", err), "history not saved");
        }
    }
}
