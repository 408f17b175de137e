use super::*;

use crate::escape::{SEPARATOR, escape_name, escape_path};

/// Change the current directory. No argument goes back to the root.
pub struct CdCommand;

impl<S: StorageSession> Command<CloudContext<S>> for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn has_args(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        "cd [path]"
    }

    fn help(&self) -> &'static str {
        "Change the current directory"
    }

    fn exec(&self, ctx: &mut CloudContext<S>, args: &[String]) -> Result<()> {
        let target = match args.first().filter(|a| !a.is_empty()) {
            None => ctx.fs.root(),
            Some(path) => ctx
                .fs
                .locate_dir(path)
                .ok_or_else(|| ShellError::DirNotFound(path.clone()))?,
        };
        ctx.fs.set_curr(target);
        Ok(())
    }

    fn arg_completer(&self) -> Option<&dyn ArgCompleter<CloudContext<S>>> {
        Some(self)
    }
}

impl<S: StorageSession> ArgCompleter<CloudContext<S>> for CdCommand {
    fn complete_arg(
        &self,
        ctx: &mut CloudContext<S>,
        index: usize,
        partial: &str,
    ) -> (String, Vec<String>) {
        if index > 0 {
            return (String::new(), Vec::new());
        }
        complete_dir_path(ctx, partial)
    }
}

/// Split `partial` at its last separator: the directory part is resolved
/// and returned as the head, the rest filters that directory's children.
fn complete_dir_path<S: StorageSession>(
    ctx: &mut CloudContext<S>,
    partial: &str,
) -> (String, Vec<String>) {
    let (dir_part, name_part) = match partial.rfind(SEPARATOR) {
        Some(i) => partial.split_at(i + 1),
        None => ("", partial),
    };
    if dir_part.is_empty() {
        return (String::new(), ctx.fs.dir_names(None, &escape_name(name_part)));
    }
    let head = escape_path(dir_part);
    match ctx.fs.locate_dir(&head) {
        Some(dir) => {
            let names = ctx.fs.dir_names(Some(dir), &escape_name(name_part));
            (head, names)
        }
        None => (String::new(), Vec::new()),
    }
}
