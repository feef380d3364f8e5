//! Process adapter for the status context hook
//!
//! Reads one host payload as JSON from stdin:
//!
//! ```json
//! { "event": "prompt:submit", "data": {}, "config": { "git_include_commits": 3 } }
//! ```
//!
//! and writes the `HookResult` as JSON to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

use status_context_hook::{logging, HookEvent, HookResult, StatusContextConfig, StatusContextHook};

#[derive(Debug, Parser)]
#[command(name = "status-context-hook", version, about = "Inject datetime and git status before each prompt")]
struct Cli {
    /// JSON config file, used when the payload carries no config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily rotated file in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Print the hook registration and exit
    #[arg(long)]
    describe: bool,
}

/// Payload the host writes to stdin
#[derive(Debug, Deserialize)]
struct HostPayload {
    event: String,
    #[serde(default)]
    config: serde_json::Value,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_dir.as_deref())?;

    let file_config = match &cli.config {
        Some(path) => StatusContextConfig::from_file(path)?,
        None => StatusContextConfig::default(),
    };

    if cli.describe {
        let hook = StatusContextHook::new(file_config);
        return emit(&hook.registration());
    }

    let mut stdin = String::new();
    std::io::stdin()
        .read_to_string(&mut stdin)
        .context("Failed to read hook payload from stdin")?;

    if stdin.trim().is_empty() {
        tracing::debug!("Empty payload, nothing to do");
        return emit(&HookResult::none());
    }

    let payload: HostPayload =
        serde_json::from_str(&stdin).context("Hook payload is not valid JSON")?;

    let event = match payload.event.parse::<HookEvent>() {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("{}", e);
            return emit(&HookResult::none());
        }
    };

    let config = if payload.config.is_null() {
        file_config
    } else {
        StatusContextConfig::from_value(payload.config)
    };

    let hook = StatusContextHook::new(config);
    let result = hook.handle(event).await?;
    emit(&result)
}

fn emit<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("Failed to serialize hook output")?;
    println!("{}", json);
    Ok(())
}
