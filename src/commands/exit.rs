use super::*;

/// Leave the shell. Registered under several names.
pub struct ExitCommand {
    name: &'static str,
}

impl ExitCommand {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl<S: StorageSession> Command<CloudContext<S>> for ExitCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn has_args(&self) -> bool {
        false
    }

    fn help(&self) -> &'static str {
        "Exit"
    }

    fn exec(&self, ctx: &mut CloudContext<S>, _args: &[String]) -> Result<()> {
        ctx.quit();
        Ok(())
    }
}
