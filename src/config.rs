use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::remote::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub aria2: Option<Aria2Config>,

    #[serde(default)]
    pub curl: Option<CurlConfig>,

    /// Where line history is kept between sessions.
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Remote id of the storage root.
    #[serde(default = "default_root_id")]
    pub root_id: String,

    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            root_id: default_root_id(),
            page_size: default_page_size(),
        }
    }
}

fn default_root_id() -> String {
    "0".to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aria2Config {
    #[serde(default = "default_aria2_path")]
    pub path: String,

    /// Hand downloads to a running aria2 over JSON-RPC instead of spawning it.
    #[serde(default)]
    pub rpc: Option<Aria2Rpc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aria2Rpc {
    pub url: String,

    #[serde(default)]
    pub secret: Option<String>,
}

fn default_aria2_path() -> String {
    "aria2c".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurlConfig {
    #[serde(default = "default_curl_path")]
    pub path: String,
}

fn default_curl_path() -> String {
    "curl".to_string()
}

impl ShellConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cloudsh").join("config.json"))
    }

    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: ShellConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url {
            self.remote.base_url = url;
        }
        if token.is_some() {
            self.remote.token = token;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.base_url.trim().is_empty() {
            anyhow::bail!("no remote configured (pass `--url` or set `remote.base_url` in the config file)");
        }
        Ok(())
    }
}
