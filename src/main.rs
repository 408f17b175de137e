use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cloudsh::config::ShellConfig;
use cloudsh::logging::{self, LogLevel};
use cloudsh::remote::RemoteClient;
use cloudsh::session::CloudContext;
use cloudsh::terminal::Terminal;

#[derive(Parser)]
#[command(name = "cloudsh")]
#[command(about = "Interactive shell for remote cloud storage", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/cloudsh/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Storage API base URL (overrides the config file)
    #[arg(long)]
    url: Option<String>,

    /// Session token (overrides the config file)
    #[arg(long)]
    token: Option<String>,

    /// Log verbosity; `RUST_LOG` takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level)?;

    let path = match cli.config {
        Some(p) => p,
        None => ShellConfig::default_path().context("cannot determine config directory")?,
    };
    let mut cfg = ShellConfig::load(&path)?;
    cfg.apply_overrides(cli.url, cli.token);
    cfg.validate()?;
    tracing::debug!(config = %path.display(), base_url = %cfg.remote.base_url, "config loaded");

    let client = RemoteClient::new(cfg.remote.clone())?;
    let ctx = CloudContext::new(client, &cfg);

    let mut term = Terminal::interactive(ctx, cfg.history_file.clone())?;
    cloudsh::commands::register_all(term.state());
    term.run()
}
