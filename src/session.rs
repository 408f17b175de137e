use std::io::Write;

use anyhow::{Context as _, Result};

use crate::config::ShellConfig;
use crate::download::Downloader;
use crate::fs::RemoteFs;
use crate::remote::{FileCursor, StorageSession};
use crate::terminal::Context;

/// Everything a command can touch: the remote view, the downloader and
/// the output stream.
pub struct CloudContext<S> {
    pub fs: RemoteFs<S>,
    pub downloader: Option<Downloader>,
    out: Box<dyn Write>,
    alive: bool,
}

impl<S: StorageSession> CloudContext<S> {
    pub fn new(session: S, cfg: &ShellConfig) -> Self {
        Self {
            fs: RemoteFs::new(session, &cfg.remote.root_id, cfg.remote.page_size),
            downloader: Downloader::from_config(cfg),
            out: Box::new(std::io::stdout()),
            alive: true,
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    /// Stop the terminal loop after the current command.
    pub fn quit(&mut self) {
        self.alive = false;
    }
}

impl<S: StorageSession> Context for CloudContext<S> {
    /// Fails when the session cannot list the root; later listings are
    /// best-effort.
    fn startup(&mut self) -> Result<()> {
        let root = self.fs.root();
        let root_id = self.fs.node(root).id.clone();
        self.fs
            .session()
            .list(&root_id, &mut FileCursor::new(1))
            .context("list root directory")?;
        self.fs.set_curr(root);
        tracing::info!(
            dirs = self.fs.node(root).children.len(),
            files = self.fs.entries().len(),
            "root listed"
        );
        Ok(())
    }

    fn alive(&self) -> bool {
        self.alive
    }

    fn prompt(&self) -> String {
        format!("cloud:{}> ", self.fs.path_of(self.fs.curr()))
    }

    fn shutdown(&mut self) -> Result<()> {
        self.out.flush().ok();
        tracing::info!("session closed");
        Ok(())
    }
}
