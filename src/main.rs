//! presetdl - Preset-driven terminal front-end for yt-dlp
//!
//! With no arguments, a full-screen terminal UI collects the URL and
//! manages option presets. With arguments, the first `http(s)://` token
//! is the URL, everything else is treated as extra yt-dlp flags, and the
//! merged result is run directly without the UI.

use anyhow::Result;
use clap::Parser;
use presetdl::preset::PresetSet;
use presetdl::runner::{ToolRunner, TOOL_NAME};
use presetdl::store::{ConfigData, ConfigStore};
use presetdl::tui;
use presetdl::utils::{is_http_url, PresetdlError};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(name = "presetdl", version, about = "Preset-driven terminal front-end for yt-dlp")]
struct Args {
    /// Media URL plus extra yt-dlp flags, resolved against the saved
    /// presets and run without the UI. Omit everything to launch the UI.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "URL_AND_FLAGS")]
    passthrough: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.passthrough.is_empty() {
        // the UI owns stdout, so logs go to a file instead
        init_file_logging()?;
        let store = ConfigStore::open_default()?;
        return tui::run(store, Vec::new());
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    run_direct(&args.passthrough)
}

fn init_file_logging() -> Result<()> {
    let dir = dirs::config_dir()
        .ok_or(PresetdlError::ConfigDirUnavailable)?
        .join("presetdl");
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("presetdl.log"))?;
    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Splits an invocation into the first `http(s)://` token and the rest,
/// which all become extra flag tokens for resolution.
fn split_invocation(tokens: &[String]) -> (Option<String>, Vec<String>) {
    let mut url = None;
    let mut extra_args = Vec::new();
    for token in tokens {
        if url.is_none() && is_http_url(token) {
            url = Some(token.clone());
        } else {
            extra_args.push(token.clone());
        }
    }
    (url, extra_args)
}

/// Resolves the saved presets against the given tokens and execs the
/// tool with inherited stdio.
fn run_direct(tokens: &[String]) -> Result<()> {
    let (url, extra_args) = split_invocation(tokens);

    let Some(url) = url else {
        eprintln!("Error: no valid URL found in arguments");
        eprintln!("Usage: presetdl [URL] [{TOOL_NAME} options...]");
        std::process::exit(1);
    };

    let store = ConfigStore::open_default()?;
    let loaded = store.load().unwrap_or_else(|e| {
        warn!("failed to load config: {e}, using defaults");
        ConfigData::default()
    });
    let presets = PresetSet::from_loaded(loaded.presets);
    let options = presets.resolve(&extra_args);

    let runner = ToolRunner::new()?;
    println!(
        "Executing: {} {}",
        TOOL_NAME,
        ToolRunner::build_args(&url, &options).join(" ")
    );
    let status = runner.run(&url, &options)?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
