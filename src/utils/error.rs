//! Error handling for presetdl

use thiserror::Error;

/// Main error type for presetdl
#[derive(Debug, Error)]
pub enum PresetdlError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    ToolNotFound,

    #[error("could not determine the user configuration directory")]
    ConfigDirUnavailable,

    #[error("failed to launch yt-dlp: {0}")]
    LaunchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
