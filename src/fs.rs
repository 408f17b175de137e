//! Lazily populated view of the remote storage.
//!
//! The directory skeleton is kept for the whole session; file entries are
//! cached for the current directory only and rebuilt on every `set_curr`.

use std::collections::HashMap;

use crate::escape::{SEPARATOR, escape_name, split_path, unescape_name};
use crate::remote::{FileCursor, RemoteEntry, StorageSession};

pub mod pattern;
mod tree;
pub use self::tree::{DirNode, DirTree, NodeId};

pub struct RemoteFs<S> {
    session: S,
    tree: DirTree,
    curr: NodeId,
    files: HashMap<String, RemoteEntry>,
    page_size: u64,
}

impl<S: StorageSession> RemoteFs<S> {
    /// Build the tree with an unlisted root. Call `set_curr(root)` to load it.
    pub fn new(session: S, root_id: &str, page_size: u64) -> Self {
        let tree = DirTree::new(root_id);
        let curr = tree.root();
        Self {
            session,
            tree,
            curr,
            files: HashMap::new(),
            page_size,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn curr(&self) -> NodeId {
        self.curr
    }

    pub fn node(&self, id: NodeId) -> &DirNode {
        self.tree.node(id)
    }

    /// Switch the current directory and relist its entries.
    ///
    /// Directories found on the way are added to the skeleton. A failing
    /// page ends the listing; entries from earlier pages stay cached.
    pub fn set_curr(&mut self, dir: NodeId) {
        self.curr = dir;
        self.files = HashMap::new();

        let dir_id = self.tree.node(dir).id.clone();
        let mut cur = FileCursor::new(self.page_size);
        while cur.has_more() {
            match self.session.list(&dir_id, &mut cur) {
                Ok(entries) => {
                    for entry in entries {
                        if entry.is_dir() {
                            self.tree.append(dir, &entry.id, &entry.name);
                        }
                        if entry.is_file() {
                            self.files.insert(entry.name.clone(), entry);
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(dir = %dir_id, offset = cur.offset, error = %format!("{:#}", err), "listing stopped early");
                    break;
                }
            }
            cur.advance();
        }
        tracing::debug!(dir = %dir_id, files = self.files.len(), "file cache rebuilt");
    }

    /// Resolve `path` against the current directory (or the root when it
    /// starts with `/`). `None` means some segment does not exist.
    pub fn locate_dir(&mut self, path: &str) -> Option<NodeId> {
        let segments = split_path(path);
        let mut dir = self.curr;
        let mut start = 0;
        if segments.len() > 1 && segments[0].is_empty() {
            dir = self.tree.root();
            start = 1;
        }

        for raw in &segments[start..] {
            let name = unescape_name(raw);
            match name.as_str() {
                "" | "." => {}
                ".." => {
                    if let Some(parent) = self.tree.parent(dir) {
                        dir = parent;
                    }
                }
                _ => {
                    if !self.tree.node(dir).children_cached {
                        self.fetch_children(dir);
                    }
                    dir = self.tree.child(dir, &name)?;
                }
            }
        }
        Some(dir)
    }

    fn fetch_children(&mut self, dir: NodeId) {
        let dir_id = self.tree.node(dir).id.clone();
        let mut cur = FileCursor::new(self.page_size);
        while cur.has_more() {
            match self.session.list(&dir_id, &mut cur) {
                Ok(entries) => {
                    for entry in entries.iter().filter(|e| e.is_dir()) {
                        self.tree.append(dir, &entry.id, &entry.name);
                    }
                }
                Err(err) => {
                    tracing::warn!(dir = %dir_id, offset = cur.offset, error = %format!("{:#}", err), "child listing stopped early");
                    break;
                }
            }
            cur.advance();
        }
        self.tree.node_mut(dir).children_cached = true;
    }

    /// Look up a file of the current directory by (escaped) name.
    pub fn file(&self, name: &str) -> Option<&RemoteEntry> {
        self.files.get(&unescape_name(name))
    }

    /// Files of the current directory whose name matches the glob `pattern`,
    /// sorted by name. Invalid patterns match nothing.
    pub fn files(&self, pattern: &str) -> Vec<&RemoteEntry> {
        let Some(matcher) = pattern::compile(pattern) else {
            return Vec::new();
        };
        let mut out = self
            .files
            .iter()
            .filter(|(name, _)| matcher.is_match(name.as_str()))
            .map(|(_, f)| f)
            .collect::<Vec<_>>();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// All cached files of the current directory, sorted by name.
    pub fn entries(&self) -> Vec<&RemoteEntry> {
        let mut out = self.files.values().collect::<Vec<_>>();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Sorted child directory names of `dir`, fetching them if needed.
    pub fn child_dirs(&mut self, dir: NodeId) -> Vec<String> {
        if !self.tree.node(dir).children_cached {
            self.fetch_children(dir);
        }
        let mut names = self.tree.node(dir).children.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Escaped names of `dir`'s (default: current) subdirectories starting
    /// with `prefix`, each ending in `/`.
    pub fn dir_names(&mut self, dir: Option<NodeId>, prefix: &str) -> Vec<String> {
        let prefix = unescape_name(prefix);
        let dir = dir.unwrap_or(self.curr);
        self.child_dirs(dir)
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .map(|name| format!("{}{}", escape_name(&name), SEPARATOR))
            .collect()
    }

    /// Escaped names of the current directory's files starting with `prefix`.
    pub fn file_names(&self, prefix: &str) -> Vec<String> {
        let prefix = unescape_name(prefix);
        let mut names = self
            .files
            .keys()
            .filter(|name| name.starts_with(&prefix))
            .map(|name| escape_name(name))
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Absolute display path of `dir`, with escaped segments.
    pub fn path_of(&self, dir: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cur = dir;
        while let Some(parent) = self.tree.parent(cur) {
            parts.push(escape_name(&self.tree.node(cur).name));
            cur = parent;
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }
}

#[cfg(test)]
#[path = "tests/fs/remote_fs_tests.rs"]
mod tests;
