//! Hand download tickets to an external downloader.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::config::{Aria2Rpc, ShellConfig};
use crate::remote::DownloadTicket;

#[derive(Clone, Debug)]
pub enum Downloader {
    Aria2 { path: String },
    Aria2Rpc(Aria2Rpc),
    Curl { path: String },
}

impl Downloader {
    /// aria2 wins over curl when both are configured.
    pub fn from_config(cfg: &ShellConfig) -> Option<Self> {
        if let Some(aria2) = &cfg.aria2 {
            return Some(match &aria2.rpc {
                Some(rpc) => Downloader::Aria2Rpc(rpc.clone()),
                None => Downloader::Aria2 {
                    path: aria2.path.clone(),
                },
            });
        }
        cfg.curl.as_ref().map(|c| Downloader::Curl {
            path: c.path.clone(),
        })
    }

    pub fn download(&self, ticket: &DownloadTicket, sha1: Option<&str>) -> Result<()> {
        match self {
            Downloader::Aria2 { path } => run_program(path, &aria2_args(ticket, sha1)),
            Downloader::Curl { path } => run_program(path, &curl_args(ticket)),
            Downloader::Aria2Rpc(rpc) => add_uri(rpc, ticket, sha1),
        }
    }
}

fn sorted_headers(ticket: &DownloadTicket) -> Vec<String> {
    let mut headers = ticket
        .headers
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>();
    headers.sort();
    headers
}

pub fn aria2_args(ticket: &DownloadTicket, sha1: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "--max-connection-per-server=2".to_string(),
        "--split=16".to_string(),
        "--min-split-size=1M".to_string(),
        format!("--out={}", ticket.file_name),
    ];
    if let Some(sha1) = sha1 {
        args.push(format!("--checksum=sha-1={}", sha1));
    }
    for h in sorted_headers(ticket) {
        args.push(format!("--header={}", h));
    }
    args.push(ticket.url.clone());
    args
}

pub fn curl_args(ticket: &DownloadTicket) -> Vec<String> {
    let mut args = vec!["-#".to_string(), ticket.url.clone()];
    for h in sorted_headers(ticket) {
        args.push("-H".to_string());
        args.push(h);
    }
    args.push("-o".to_string());
    args.push(ticket.file_name.clone());
    args
}

fn run_program(path: &str, args: &[String]) -> Result<()> {
    tracing::debug!(program = path, ?args, "spawn downloader");
    let status = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .status()
        .with_context(|| format!("run {}", path))?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", path, status);
    }
    Ok(())
}

pub fn aria2_rpc_request(
    rpc: &Aria2Rpc,
    ticket: &DownloadTicket,
    sha1: Option<&str>,
) -> serde_json::Value {
    let mut options = serde_json::json!({
        "out": ticket.file_name,
        "header": sorted_headers(ticket),
    });
    if let Some(sha1) = sha1 {
        options["checksum"] = serde_json::Value::String(format!("sha-1={}", sha1));
    }

    let mut params = Vec::new();
    if let Some(secret) = &rpc.secret {
        params.push(serde_json::Value::String(format!("token:{}", secret)));
    }
    params.push(serde_json::json!([ticket.url]));
    params.push(options);

    serde_json::json!({
        "jsonrpc": "2.0",
        "id": "cloudsh",
        "method": "aria2.addUri",
        "params": params,
    })
}

fn add_uri(rpc: &Aria2Rpc, ticket: &DownloadTicket, sha1: Option<&str>) -> Result<()> {
    let resp = reqwest::blocking::Client::new()
        .post(&rpc.url)
        .json(&aria2_rpc_request(rpc, ticket, sha1))
        .send()
        .context("aria2 rpc request")?;
    let body: serde_json::Value = resp.json().context("parse aria2 rpc response")?;
    if let Some(err) = body.get("error") {
        let msg = err
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        anyhow::bail!("aria2 rejected download: {}", msg);
    }
    let gid = body.get("result").and_then(|r| r.as_str()).unwrap_or("?");
    tracing::info!(gid, file = %ticket.file_name, "queued on aria2");
    Ok(())
}
