use anyhow::{Context, Result};

use crate::config::RemoteConfig;

mod http_client;
use self::http_client::with_retries;

mod types;
pub use self::types::*;

/// What the shell needs from a storage backend.
pub trait StorageSession {
    /// Fetch one page of `dir_id`'s entries at `cursor`, recording the
    /// total entry count on the cursor.
    fn list(&self, dir_id: &str, cursor: &mut FileCursor) -> Result<Vec<RemoteEntry>>;

    fn download_ticket(&self, pick_code: &str) -> Result<DownloadTicket>;
}

pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Offset-based pagination state for one listing pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCursor {
    pub offset: u64,
    pub limit: u64,
    total: Option<u64>,
}

impl FileCursor {
    pub fn new(limit: u64) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            total: None,
        }
    }

    /// True until a page has reported the total and the offset reached it.
    pub fn has_more(&self) -> bool {
        self.total.is_none_or(|t| self.offset < t)
    }

    pub fn advance(&mut self) {
        self.offset += self.limit;
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = Some(total);
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl Default for FileCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// HTTP/JSON implementation of [`StorageSession`].
pub struct RemoteClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cloudsh/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build reqwest client")?;
        Ok(Self { remote, client })
    }

    pub fn list_page(&self, dir_id: &str, offset: u64, limit: u64) -> Result<ListPage> {
        let resp = self
            .authed(
                self.client
                    .get(self.url(&format!("/dirs/{}/entries", dir_id)))
                    .query(&[("offset", offset), ("limit", limit)]),
            )
            .send()
            .context("list entries request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("remote directory not found: {}", dir_id);
        }

        let page: ListPage = self
            .ensure_ok(resp, "list entries")?
            .json()
            .context("parse list entries response")?;
        Ok(page)
    }
}

impl StorageSession for RemoteClient {
    fn list(&self, dir_id: &str, cursor: &mut FileCursor) -> Result<Vec<RemoteEntry>> {
        let page = self.list_page(dir_id, cursor.offset, cursor.limit)?;
        cursor.set_total(page.total);
        Ok(page.entries)
    }

    fn download_ticket(&self, pick_code: &str) -> Result<DownloadTicket> {
        with_retries(&format!("create download ticket {}", pick_code), || {
            let resp = self
                .authed(
                    self.client
                        .post(self.url(&format!("/files/{}/ticket", pick_code))),
                )
                .send()
                .context("send")?;
            self.ensure_ok(resp, "create download ticket")?
                .json::<DownloadTicket>()
                .context("parse download ticket")
        })
    }
}
