use std::rc::Rc;

use super::*;
use crate::config::ShellConfig;
use crate::terminal::Context;
use crate::test_support::{MemorySession, SharedBuf};

fn shell() -> (Rc<ShellState<CloudContext<MemorySession>>>, SharedBuf) {
    let out = SharedBuf::default();
    let mut ctx = CloudContext::new(MemorySession::sample(), &ShellConfig::default())
        .with_output(Box::new(out.clone()));
    ctx.startup().expect("startup");
    let state = ShellState::new(ctx);
    register_all(&state);
    (state, out)
}

fn pwd(state: &ShellState<CloudContext<MemorySession>>) -> String {
    state.with_ctx(|c| c.fs.path_of(c.fs.curr()))
}

fn shell_error(err: &anyhow::Error) -> Option<&ShellError> {
    err.downcast_ref::<ShellError>()
}

#[test]
fn cd_walks_relative_and_absolute_paths() -> Result<()> {
    let (state, out) = shell();
    state.dispatch("cd a")?;
    assert_eq!(pwd(&state), "/a");
    state.dispatch("cd b")?;
    assert_eq!(pwd(&state), "/a/b");
    state.dispatch("cd ..")?;
    assert_eq!(pwd(&state), "/a");
    state.dispatch("cd /c")?;
    assert_eq!(pwd(&state), "/c");
    state.dispatch("cd")?;
    assert_eq!(pwd(&state), "/");

    state.dispatch("pwd")?;
    assert_eq!(out.text(), "/\n");
    Ok(())
}

#[test]
fn cd_to_missing_dir_fails_and_stays() -> Result<()> {
    let (state, _out) = shell();
    state.dispatch("cd a")?;
    let err = state.dispatch("cd zzz/b").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::DirNotFound("zzz/b".to_string())));
    assert_eq!(pwd(&state), "/a");
    Ok(())
}

#[test]
fn ls_shows_dirs_then_files() -> Result<()> {
    let (state, out) = shell();
    state.dispatch("ls")?;
    let lines = out.text().lines().map(|l| l.trim().to_string()).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec!["-  a/", "-  c/", r"42  my\ file.txt", "42  readme.txt"]
    );
    Ok(())
}

#[test]
fn dl_requires_an_argument() {
    let (state, _out) = shell();
    let err = state.dispatch("dl").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::ArgumentsInsufficient));
    let err = state.dispatch("dl  ").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::ArgumentsInsufficient));
}

#[test]
fn dl_reports_missing_files_before_downloader() {
    let (state, _out) = shell();
    let err = state.dispatch("dl nothing.bin").unwrap_err();
    assert_eq!(
        shell_error(&err),
        Some(&ShellError::FileNotFound("nothing.bin".to_string()))
    );
    let err = state.dispatch("dl *.zip").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::FileNotFound("*.zip".to_string())));
}

#[test]
fn dl_without_downloader_fails() {
    let (state, out) = shell();
    let err = state.dispatch(r"dl my\ file.txt").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::NoDownloader));
    assert!(out.text().is_empty());
}

#[test]
fn dl_completes_file_names() {
    let (state, _out) = shell();
    let c = state.complete("dl my", 5);
    assert_eq!(c.head, "dl ");
    assert_eq!(c.candidates, vec![r"my\ file.txt"]);

    let c = state.complete("dl ", 3);
    assert_eq!(c.candidates, vec![r"my\ file.txt", "readme.txt"]);
}

#[test]
fn cd_completes_nested_dirs() {
    let (state, _out) = shell();
    let c = state.complete("cd ", 3);
    assert_eq!(c.candidates, vec!["a/", "c/"]);

    let c = state.complete("cd a/", 5);
    assert_eq!(c.head, "cd a/");
    assert_eq!(c.candidates, vec!["b/"]);

    let c = state.complete("cd /a/", 6);
    assert_eq!(c.head, "cd /a/");
    assert_eq!(c.candidates, vec!["b/"]);

    let c = state.complete("cd nope/", 8);
    assert!(c.candidates.is_empty());

    // Only the first argument is a path.
    let c = state.complete("cd a ", 5);
    assert!(c.candidates.is_empty());
}

#[test]
fn command_name_completion_over_builtins() {
    let (state, _out) = shell();
    assert_eq!(state.complete("d", 1).candidates, vec!["dl "]);
    assert_eq!(state.complete("p", 1).candidates, vec!["pwd"]);
    assert_eq!(state.complete("", 0).candidates.len(), 7);
}

#[test]
fn help_lists_and_describes() -> Result<()> {
    let (state, out) = shell();
    state.dispatch("help")?;
    let text = out.text();
    for name in ["cd [path]", "dl <file|glob>...", "help [command]", "ls", "pwd", "exit", "quit"] {
        assert!(text.contains(name), "missing {} in {}", name, text);
    }

    out.clear();
    state.dispatch("help cd")?;
    assert_eq!(out.text(), "usage: cd [path]\nChange the current directory\n");

    let err = state.dispatch("help nope").unwrap_err();
    assert_eq!(shell_error(&err), Some(&ShellError::CommandNotFound("nope".to_string())));

    assert_eq!(state.complete("help e", 6).candidates, vec!["exit"]);
    Ok(())
}

#[test]
fn exit_and_quit_end_the_session() -> Result<()> {
    for name in ["exit", "quit"] {
        let (state, _out) = shell();
        assert!(state.with_ctx(|c| c.alive()));
        state.dispatch(name)?;
        assert!(!state.with_ctx(|c| c.alive()));
    }
    Ok(())
}

#[test]
fn prompt_tracks_current_dir() -> Result<()> {
    let (state, _out) = shell();
    assert_eq!(state.with_ctx(|c| c.prompt()), "cloud:/> ");
    state.dispatch("cd a/b")?;
    assert_eq!(state.with_ctx(|c| c.prompt()), "cloud:/a/b> ");
    Ok(())
}

struct NoInput {
    prompts: usize,
}

impl crate::terminal::LineEditor for NoInput {
    fn read_line(&mut self, _prompt: &str) -> std::result::Result<String, crate::terminal::ReadError> {
        self.prompts += 1;
        Err(crate::terminal::ReadError::Aborted)
    }

    fn append_history(&mut self, _line: &str) {}
}

#[test]
fn startup_fails_when_root_cannot_be_listed() {
    let session = MemorySession::sample();
    session.fail_at("0", 0);
    let mut ctx = CloudContext::new(session, &ShellConfig::default())
        .with_output(Box::new(SharedBuf::default()));
    let err = ctx.startup().unwrap_err();
    assert!(format!("{:#}", err).contains("list root directory"), "{:#}", err);

    let session = MemorySession::sample();
    session.fail_at("0", 0);
    let ctx = CloudContext::new(session, &ShellConfig::default())
        .with_output(Box::new(SharedBuf::default()));
    let mut term = crate::terminal::Terminal::with_editor(ShellState::new(ctx), NoInput { prompts: 0 })
        .with_error_output(Box::new(SharedBuf::default()));
    register_all(term.state());
    assert!(term.run().is_err());
    assert_eq!(term.editor().prompts, 0);
}
