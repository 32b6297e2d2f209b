//! presetdl library

pub mod preset;
pub mod runner;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export main types for easier use
pub use preset::{default_presets, DownloadOption, Preset, PresetSet};
pub use runner::ToolRunner;
pub use store::{ConfigData, ConfigStore, HistoryConfig};
pub use utils::PresetdlError;
