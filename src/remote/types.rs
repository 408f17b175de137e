//! DTOs for the storage API.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a directory listing. Cached as-is for files.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,

    /// Content fingerprint, used to verify downloads.
    #[serde(default)]
    pub sha1: Option<String>,

    /// Access code needed to mint a download ticket.
    #[serde(default)]
    pub pick_code: Option<String>,

    #[serde(default)]
    pub size: u64,
}

impl RemoteEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ListPage {
    pub total: u64,
    pub entries: Vec<RemoteEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DownloadTicket {
    pub url: String,
    pub file_name: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}
