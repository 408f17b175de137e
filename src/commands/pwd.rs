use super::*;

pub struct PwdCommand;

impl<S: StorageSession> Command<CloudContext<S>> for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn has_args(&self) -> bool {
        false
    }

    fn help(&self) -> &'static str {
        "Print the current directory"
    }

    fn exec(&self, ctx: &mut CloudContext<S>, _args: &[String]) -> Result<()> {
        let path = ctx.fs.path_of(ctx.fs.curr());
        writeln!(ctx.out(), "{}", path)?;
        Ok(())
    }
}
