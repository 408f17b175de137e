//! In-memory storage backend for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use anyhow::Result;

use crate::remote::{DownloadTicket, EntryKind, FileCursor, RemoteEntry, StorageSession};

pub(crate) fn dir(id: &str, name: &str) -> RemoteEntry {
    RemoteEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind: EntryKind::Dir,
        sha1: None,
        pick_code: None,
        size: 0,
    }
}

pub(crate) fn file(id: &str, name: &str) -> RemoteEntry {
    RemoteEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind: EntryKind::File,
        sha1: Some(format!("sha1-{}", id)),
        pick_code: Some(format!("pc-{}", id)),
        size: 42,
    }
}

#[derive(Default)]
pub(crate) struct MemorySession {
    dirs: HashMap<String, Vec<RemoteEntry>>,
    /// `(dir id, offset)` at which `list` fails.
    fail_at: RefCell<Option<(String, u64)>>,
    list_calls: Cell<usize>,
    listed: RefCell<Vec<String>>,
}

impl MemorySession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_dir(mut self, dir_id: &str, entries: Vec<RemoteEntry>) -> Self {
        self.dirs.insert(dir_id.to_string(), entries);
        self
    }

    pub(crate) fn fail_at(&self, dir_id: &str, offset: u64) {
        *self.fail_at.borrow_mut() = Some((dir_id.to_string(), offset));
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub(crate) fn listed_dirs(&self) -> Vec<String> {
        self.listed.borrow().clone()
    }

    /// Root "0" with `a/b`, a sibling `c`, and a few files.
    pub(crate) fn sample() -> Self {
        Self::new()
            .with_dir(
                "0",
                vec![
                    dir("1", "a"),
                    dir("3", "c"),
                    file("10", "readme.txt"),
                    file("11", "my file.txt"),
                ],
            )
            .with_dir("1", vec![dir("2", "b"), file("12", "inner.bin")])
            .with_dir("2", vec![file("13", "deep.iso"), file("14", "deep.txt")])
            .with_dir("3", vec![])
    }
}

impl StorageSession for MemorySession {
    fn list(&self, dir_id: &str, cursor: &mut FileCursor) -> Result<Vec<RemoteEntry>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.listed.borrow_mut().push(dir_id.to_string());
        if let Some((d, off)) = self.fail_at.borrow().as_ref() {
            if d == dir_id && *off == cursor.offset {
                anyhow::bail!("listing {} failed at {}", dir_id, off);
            }
        }
        let entries = self
            .dirs
            .get(dir_id)
            .ok_or_else(|| anyhow::anyhow!("unknown dir {}", dir_id))?;
        cursor.set_total(entries.len() as u64);
        let start = (cursor.offset as usize).min(entries.len());
        let end = (start + cursor.limit as usize).min(entries.len());
        Ok(entries[start..end].to_vec())
    }

    fn download_ticket(&self, pick_code: &str) -> Result<DownloadTicket> {
        Ok(DownloadTicket {
            url: format!("http://files.invalid/{}", pick_code),
            file_name: pick_code.to_string(),
            headers: HashMap::new(),
        })
    }
}

/// Clonable writer whose contents tests can read back.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
