use crate::escape::{ESCAPE, split_input};

use super::command::Registry;

/// Result of completing a line: the line becomes `head + candidate + tail`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    pub head: String,
    pub candidates: Vec<String>,
    pub tail: String,
}

/// Complete `line` at char offset `cursor`.
///
/// With one field left of the cursor the command name is completed;
/// otherwise the named command's [`ArgCompleter`](super::ArgCompleter) is
/// asked about the last field.
pub fn complete<C>(registry: &Registry<C>, ctx: &mut C, line: &str, cursor: usize) -> Completion {
    let left = line.chars().take(cursor).collect::<String>();
    let right = line.chars().skip(cursor).collect::<String>();
    let fields = split_input(&left);

    if fields.len() == 1 {
        let candidates = registry
            .with_prefix(&fields[0])
            .into_iter()
            .map(|cmd| {
                if cmd.has_args() {
                    format!("{} ", cmd.name())
                } else {
                    cmd.name().to_string()
                }
            })
            .collect();
        return Completion {
            head: String::new(),
            candidates,
            tail: String::new(),
        };
    }

    let unchanged = Completion {
        head: left.clone(),
        candidates: Vec::new(),
        tail: right.clone(),
    };
    let name = fields[0].as_str();
    let Some(cmd) = registry.get(name) else {
        return unchanged;
    };
    let Some(completer) = cmd.arg_completer() else {
        return unchanged;
    };

    let last = fields.len() - 1;
    let mut head = format!("{} ", name);
    for arg in fields[1..last].iter().filter(|a| !a.is_empty()) {
        head.push_str(&escape_field(arg));
        head.push(' ');
    }

    let (fragment, candidates) = completer.complete_arg(ctx, last - 1, &fields[last]);
    head.push_str(&fragment);
    Completion {
        head,
        candidates,
        tail: right,
    }
}

/// Re-escape a tokenized field so it splits back into the same field.
fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        if c == ESCAPE || c.is_whitespace() {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../tests/terminal/complete_tests.rs"]
mod tests;
