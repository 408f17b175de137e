use std::collections::HashMap;

use anyhow::Result;

/// Static description of a command, used by `help`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDef {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
}

/// A named handler run against the shell context `C`.
pub trait Command<C> {
    fn name(&self) -> &'static str;

    /// Whether the command takes arguments. Completion appends a space to
    /// the names of commands that do.
    fn has_args(&self) -> bool;

    fn usage(&self) -> &'static str {
        self.name()
    }

    fn help(&self) -> &'static str {
        ""
    }

    fn exec(&self, ctx: &mut C, args: &[String]) -> Result<()>;

    /// Argument completion, for commands that support it.
    fn arg_completer(&self) -> Option<&dyn ArgCompleter<C>> {
        None
    }

    fn def(&self) -> CommandDef {
        CommandDef {
            name: self.name(),
            usage: self.usage(),
            help: self.help(),
        }
    }
}

pub trait ArgCompleter<C> {
    /// Complete argument number `index` (zero-based, command name excluded)
    /// from its partially typed text. Returns a fragment appended to the
    /// line's head and the candidates that follow it.
    fn complete_arg(&self, ctx: &mut C, index: usize, partial: &str) -> (String, Vec<String>);
}

pub struct Registry<C> {
    cmds: HashMap<&'static str, Box<dyn Command<C>>>,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            cmds: HashMap::new(),
        }
    }
}

impl<C> Registry<C> {
    /// Add a command, replacing any earlier one with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command<C>>) {
        self.cmds.insert(cmd.name(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command<C>> {
        self.cmds.get(name).map(|c| c.as_ref())
    }

    /// Commands whose name starts with `prefix`, sorted by name.
    pub fn with_prefix(&self, prefix: &str) -> Vec<&dyn Command<C>> {
        let mut out = self
            .cmds
            .values()
            .filter(|c| c.name().starts_with(prefix))
            .map(|c| c.as_ref())
            .collect::<Vec<_>>();
        out.sort_by_key(|c| c.name());
        out
    }

    pub fn defs(&self) -> Vec<CommandDef> {
        self.with_prefix("").into_iter().map(|c| c.def()).collect()
    }
}
