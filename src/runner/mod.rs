//! Invocation of the external download tool
//!
//! yt-dlp is an opaque subprocess: the contract is the argument vector
//! going in and the exit status coming out. Exactly one download runs at
//! a time, with the terminal handed over to the tool for its duration.

use crate::preset::DownloadOption;
use crate::utils::error::PresetdlError;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::{error, info, warn};

/// Name of the external tool binary.
pub const TOOL_NAME: &str = "yt-dlp";

/// Runs the external download tool.
pub struct ToolRunner {
    tool_path: PathBuf,
}

impl ToolRunner {
    /// Locates the tool on PATH and verifies it exists.
    pub fn new() -> Result<Self, PresetdlError> {
        let tool_path = which::which(TOOL_NAME).map_err(|_| {
            error!("{TOOL_NAME} not found on PATH");
            PresetdlError::ToolNotFound
        })?;
        info!("using {} at {}", TOOL_NAME, tool_path.display());
        Ok(Self { tool_path })
    }

    /// Argument vector for one invocation: the URL first, then every
    /// enabled option's flag string split on whitespace into separate
    /// tokens (`--audio-quality 0` contributes two entries).
    pub fn build_args(url: &str, options: &[DownloadOption]) -> Vec<String> {
        let mut args = vec![url.to_string()];
        for option in options.iter().filter(|o| o.enabled) {
            args.extend(option.flag.split_whitespace().map(str::to_string));
        }
        args
    }

    /// Runs the tool with inherited stdio and waits for it to finish.
    ///
    /// The caller owns the terminal: in interactive mode the UI must be
    /// suspended around this call so the tool writes straight to the
    /// user's terminal.
    pub fn run(&self, url: &str, options: &[DownloadOption]) -> Result<ExitStatus, PresetdlError> {
        let args = Self::build_args(url, options);
        info!("executing: {} {}", TOOL_NAME, args.join(" "));

        let status = Command::new(&self.tool_path)
            .args(&args)
            .status()
            .map_err(|e| PresetdlError::LaunchError(e.to_string()))?;

        if status.success() {
            info!("{TOOL_NAME} finished successfully");
        } else {
            warn!("{TOOL_NAME} exited with {status}");
        }
        Ok(status)
    }
}
