use super::*;

use crate::escape::escape_name;
use crate::fs::pattern::is_glob_query;
use crate::remote::RemoteEntry;

/// Download files of the current directory by name or glob.
pub struct DlCommand;

impl<S: StorageSession> Command<CloudContext<S>> for DlCommand {
    fn name(&self) -> &'static str {
        "dl"
    }

    fn has_args(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        "dl <file|glob>..."
    }

    fn help(&self) -> &'static str {
        "Download files from the current directory"
    }

    fn exec(&self, ctx: &mut CloudContext<S>, args: &[String]) -> Result<()> {
        let args = args.iter().filter(|a| !a.is_empty()).collect::<Vec<_>>();
        if args.is_empty() {
            return Err(ShellError::ArgumentsInsufficient.into());
        }

        let mut picked = Vec::new();
        for arg in args {
            picked.extend(select_files(ctx, arg)?);
        }

        let downloader = ctx.downloader.clone().ok_or(ShellError::NoDownloader)?;
        for file in picked {
            writeln!(ctx.out(), "Downloading file: {}", file.name)?;
            let pick_code = file
                .pick_code
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("{} has no access code", file.name))?;
            let ticket = ctx.fs.session().download_ticket(pick_code)?;
            downloader.download(&ticket, file.sha1.as_deref())?;
        }
        Ok(())
    }

    fn arg_completer(&self) -> Option<&dyn ArgCompleter<CloudContext<S>>> {
        Some(self)
    }
}

impl<S: StorageSession> ArgCompleter<CloudContext<S>> for DlCommand {
    fn complete_arg(
        &self,
        ctx: &mut CloudContext<S>,
        _index: usize,
        partial: &str,
    ) -> (String, Vec<String>) {
        (String::new(), ctx.fs.file_names(&escape_name(partial)))
    }
}

fn select_files<S: StorageSession>(ctx: &CloudContext<S>, arg: &str) -> Result<Vec<RemoteEntry>> {
    if is_glob_query(arg) {
        let files = ctx.fs.files(arg);
        if files.is_empty() {
            return Err(ShellError::FileNotFound(arg.to_string()).into());
        }
        return Ok(files.into_iter().cloned().collect());
    }

    let file = ctx
        .fs
        .file(arg)
        .ok_or_else(|| ShellError::FileNotFound(arg.to_string()))?;
    if !file.is_file() {
        return Err(ShellError::NotAFile(arg.to_string()).into());
    }
    Ok(vec![file.clone()])
}
