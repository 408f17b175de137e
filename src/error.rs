use thiserror::Error;

/// User-facing failures raised by dispatch and the built-in commands.
///
/// Transport and I/O failures travel as `anyhow::Error` with context; these
/// variants exist so callers (and tests) can tell the shell's own conditions
/// apart with `downcast_ref`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("no such command: {0}")]
    CommandNotFound(String),

    #[error("not enough arguments")]
    ArgumentsInsufficient,

    #[error("no such directory: {0}")]
    DirNotFound(String),

    #[error("no such file: {0}")]
    FileNotFound(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("no downloader configured (set `aria2` or `curl` in the config file)")]
    NoDownloader,
}
