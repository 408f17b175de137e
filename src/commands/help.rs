use super::*;

pub struct HelpCommand {
    defs: Vec<CommandDef>,
}

impl HelpCommand {
    pub const DEF: CommandDef = CommandDef {
        name: "help",
        usage: "help [command]",
        help: "Show help",
    };

    pub fn new(defs: Vec<CommandDef>) -> Self {
        Self { defs }
    }
}

impl<S: StorageSession> Command<CloudContext<S>> for HelpCommand {
    fn name(&self) -> &'static str {
        Self::DEF.name
    }

    fn has_args(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        Self::DEF.usage
    }

    fn help(&self) -> &'static str {
        Self::DEF.help
    }

    fn exec(&self, ctx: &mut CloudContext<S>, args: &[String]) -> Result<()> {
        let out = ctx.out();
        if let Some(name) = args.first().filter(|a| !a.is_empty()) {
            let def = self
                .defs
                .iter()
                .find(|d| d.name == name.as_str())
                .ok_or_else(|| ShellError::CommandNotFound(name.clone()))?;
            writeln!(out, "usage: {}", def.usage)?;
            if !def.help.is_empty() {
                writeln!(out, "{}", def.help)?;
            }
            return Ok(());
        }

        let width = self.defs.iter().map(|d| d.usage.len()).max().unwrap_or(0);
        for d in &self.defs {
            writeln!(out, "{:<width$}  {}", d.usage, d.help, width = width)?;
        }
        Ok(())
    }

    fn arg_completer(&self) -> Option<&dyn ArgCompleter<CloudContext<S>>> {
        Some(self)
    }
}

impl<S: StorageSession> ArgCompleter<CloudContext<S>> for HelpCommand {
    fn complete_arg(
        &self,
        _ctx: &mut CloudContext<S>,
        index: usize,
        partial: &str,
    ) -> (String, Vec<String>) {
        if index > 0 {
            return (String::new(), Vec::new());
        }
        let names = self
            .defs
            .iter()
            .filter(|d| d.name.starts_with(partial))
            .map(|d| d.name.to_string())
            .collect();
        (String::new(), names)
    }
}
