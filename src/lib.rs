pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod escape;
pub mod fs;
pub mod logging;
pub mod remote;
pub mod session;
pub mod terminal;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
