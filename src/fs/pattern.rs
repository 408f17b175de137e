use globset::{Glob, GlobMatcher};

pub fn is_glob_query(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[')
}

/// Compile `pattern`, or `None` when it is not valid glob syntax.
pub fn compile(pattern: &str) -> Option<GlobMatcher> {
    match Glob::new(pattern) {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "invalid glob");
            None
        }
    }
}
