//! Input splitting and name escaping.
//!
//! Remote names may contain spaces or the path separator. On the input line
//! those characters are written with a leading `\`, and the same marker is
//! used by completion when it puts names back on the line.

pub const ESCAPE: char = '\\';
pub const SEPARATOR: char = '/';

const FIELD_SPACE: char = ' ';

/// Split an input line into fields.
///
/// The trailing field is always emitted, even when empty: `"ls "` gives
/// `["ls", ""]`, which completion reads as "a new argument is being typed".
pub fn split_input(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut escape = false;

    for ch in input.chars() {
        if escape {
            cur.push(ch);
            escape = false;
            continue;
        }

        match ch {
            ESCAPE => {
                escape = true;
            }
            FIELD_SPACE => {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
            }
            c => {
                cur.push(c);
            }
        }
    }

    out.push(cur);
    out
}

fn needs_escape(c: char) -> bool {
    c == SEPARATOR || c.is_whitespace()
}

pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if needs_escape(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

pub fn unescape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Split a path on separators that are not escaped. Segments keep their
/// escape markers; callers unescape each one.
pub fn split_path(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut escape = false;
    for (i, c) in path.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if c == ESCAPE {
            escape = true;
        } else if c == SEPARATOR {
            out.push(&path[start..i]);
            start = i + c.len_utf8();
        }
    }
    out.push(&path[start..]);
    out
}

/// Escape every segment of an unescaped path, keeping the separators.
pub fn escape_path(path: &str) -> String {
    path.split(SEPARATOR)
        .map(escape_name)
        .collect::<Vec<_>>()
        .join("/")
}
