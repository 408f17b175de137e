use super::*;

use crate::escape::escape_name;

/// List the current directory: subdirectories first, then files.
pub struct LsCommand;

impl<S: StorageSession> Command<CloudContext<S>> for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn has_args(&self) -> bool {
        false
    }

    fn help(&self) -> &'static str {
        "List the current directory"
    }

    fn exec(&self, ctx: &mut CloudContext<S>, _args: &[String]) -> Result<()> {
        let curr = ctx.fs.curr();
        let mut lines = ctx
            .fs
            .child_dirs(curr)
            .iter()
            .map(|name| format!("{:>12}  {}/", "-", escape_name(name)))
            .collect::<Vec<_>>();
        lines.extend(
            ctx.fs
                .entries()
                .iter()
                .map(|f| format!("{:>12}  {}", f.size, escape_name(&f.name))),
        );

        let out = ctx.out();
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
