//! Built-in shell commands.

use anyhow::Result;

use crate::error::ShellError;
use crate::remote::StorageSession;
use crate::session::CloudContext;
use crate::terminal::{ArgCompleter, Command, CommandDef, ShellState};

mod cd;
mod dl;
mod exit;
mod help;
mod ls;
mod pwd;

pub use self::cd::CdCommand;
pub use self::dl::DlCommand;
pub use self::exit::ExitCommand;
pub use self::help::HelpCommand;
pub use self::ls::LsCommand;
pub use self::pwd::PwdCommand;

/// Register every built-in, `help` last so it sees the others.
pub fn register_all<S: StorageSession + 'static>(state: &ShellState<CloudContext<S>>) {
    let cmds: Vec<Box<dyn Command<CloudContext<S>>>> = vec![
        Box::new(LsCommand),
        Box::new(CdCommand),
        Box::new(PwdCommand),
        Box::new(DlCommand),
        Box::new(ExitCommand::new("exit")),
        Box::new(ExitCommand::new("quit")),
    ];
    let mut defs = cmds.iter().map(|c| c.def()).collect::<Vec<CommandDef>>();
    defs.push(HelpCommand::DEF);
    defs.sort_by_key(|d| d.name);
    for cmd in cmds {
        state.register(cmd);
    }
    state.register(Box::new(HelpCommand::new(defs)));
}

#[cfg(test)]
#[path = "tests/commands/commands_tests.rs"]
mod tests;
