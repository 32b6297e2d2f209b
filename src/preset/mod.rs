//! Preset and option data model
//!
//! A preset is a named, independently activatable bundle of yt-dlp options.
//! The whole collection is owned by [`PresetSet`]; UI selection structures
//! refer into it by index only.

pub mod merge;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single yt-dlp invocation flag with an enable toggle and a comment.
///
/// The flag string may carry a value after whitespace (`--audio-quality 0`)
/// or after `=` (`--format=best`); it is split into separate argv tokens
/// only at invocation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOption {
    pub flag: String,
    pub comment: String,
    pub enabled: bool,
}

impl DownloadOption {
    pub fn new(flag: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            comment: comment.into(),
            enabled: true,
        }
    }
}

/// A named group of options. Only options of an active preset participate
/// in resolution, and only when individually enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub options: Vec<DownloadOption>,
    pub active: bool,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            active: false,
        }
    }

    /// Appends an option with `enabled = true`. An empty flag is ignored.
    pub fn add_option(&mut self, flag: &str, comment: &str) -> bool {
        if flag.is_empty() {
            debug!("ignoring option with empty flag");
            return false;
        }
        self.options.push(DownloadOption::new(flag, comment));
        true
    }

    pub fn toggle_option(&mut self, index: usize) {
        if let Some(option) = self.options.get_mut(index) {
            option.enabled = !option.enabled;
        }
    }

    /// Removes the option at `index`. Emptying the list is allowed.
    pub fn delete_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.options.remove(index);
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.options.iter().filter(|o| o.enabled).count()
    }
}

/// The owned, ordered collection of presets plus its collection-level
/// operations. Stored order is display order and merge-precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSet {
    presets: Vec<Preset>,
}

impl PresetSet {
    /// Wraps loaded presets, substituting the built-in defaults when the
    /// loaded list is empty.
    pub fn from_loaded(presets: Vec<Preset>) -> Self {
        if presets.is_empty() {
            debug!("no saved presets, using built-in defaults");
            Self {
                presets: default_presets(),
            }
        } else {
            Self { presets }
        }
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Preset> {
        self.presets.get_mut(index)
    }

    pub fn toggle_active(&mut self, index: usize) {
        if let Some(preset) = self.presets.get_mut(index) {
            preset.active = !preset.active;
        }
    }

    /// Appends an empty, inactive preset and returns its index.
    pub fn add(&mut self, name: &str) -> usize {
        self.presets.push(Preset::new(name));
        self.presets.len() - 1
    }

    /// Deletes by position. Refused when only one preset remains, so the
    /// collection never becomes empty.
    pub fn delete(&mut self, index: usize) -> bool {
        if self.presets.len() <= 1 || index >= self.presets.len() {
            return false;
        }
        self.presets.remove(index);
        true
    }

    /// Replaces the preset's options with a fresh copy of the built-in
    /// default of the same name. No-op when no default carries the name.
    pub fn reset_to_default(&mut self, index: usize) -> bool {
        let Some(preset) = self.presets.get_mut(index) else {
            return false;
        };
        match default_presets().into_iter().find(|d| d.name == preset.name) {
            Some(default) => {
                preset.options = default.options;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole collection with the built-in defaults.
    pub fn reset_all(&mut self) {
        self.presets = default_presets();
    }

    /// Resolved options for one invocation; see [`merge::resolve`].
    pub fn resolve(&self, extra_args: &[String]) -> Vec<DownloadOption> {
        merge::resolve(&self.presets, extra_args)
    }
}

/// The three presets shipped with the application. Used when no saved
/// configuration exists, and as the source for resets.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Defaults".to_string(),
            active: true,
            options: vec![
                DownloadOption::new("--format=best", "Download best quality"),
                DownloadOption::new("--write-thumbnail", "Write thumbnail image"),
                DownloadOption::new("--write-description", "Write video description"),
            ],
        },
        Preset {
            name: "For Music".to_string(),
            active: false,
            options: vec![
                DownloadOption::new("--extract-audio", "Extract audio only"),
                DownloadOption::new("--audio-format mp3", "Convert to MP3"),
                DownloadOption::new("--audio-quality 0", "Best audio quality"),
                DownloadOption::new("--embed-thumbnail", "Embed thumbnail in audio"),
            ],
        },
        Preset {
            name: "Low Quality".to_string(),
            active: false,
            options: vec![
                DownloadOption::new("--format=best[height<=720]", "Max 720p video"),
                DownloadOption::new("--write-sub", "Download subtitles"),
                DownloadOption::new("--sub-lang en", "English subtitles"),
                DownloadOption::new("--embed-subs", "Embed subtitles"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_option_empty_flag_is_noop() {
        let mut preset = Preset::new("Test");
        assert!(!preset.add_option("", "some comment"));
        assert!(preset.options.is_empty());

        assert!(preset.add_option("--verbose", ""));
        assert_eq!(preset.options.len(), 1);
        assert!(preset.options[0].enabled);
    }

    #[test]
    fn test_toggle_option() {
        let mut preset = Preset::new("Test");
        preset.add_option("--verbose", "");
        preset.toggle_option(0);
        assert!(!preset.options[0].enabled);
        preset.toggle_option(0);
        assert!(preset.options[0].enabled);
        // out of range is a no-op
        preset.toggle_option(5);
    }

    #[test]
    fn test_delete_last_option_allowed() {
        let mut preset = Preset::new("Test");
        preset.add_option("--verbose", "");
        preset.delete_option(0);
        assert!(preset.options.is_empty());
    }

    #[test]
    fn test_delete_last_preset_refused() {
        let mut set = PresetSet::from_loaded(vec![Preset::new("Only")]);
        assert!(!set.delete(0));
        assert_eq!(set.len(), 1);

        set.add("Second");
        assert!(set.delete(0));
        assert_eq!(set.len(), 1);
        assert!(!set.delete(0));
    }

    #[test]
    fn test_empty_load_falls_back_to_defaults() {
        let set = PresetSet::from_loaded(Vec::new());
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).unwrap().name, "Defaults");
        assert!(set.get(0).unwrap().active);
        assert!(!set.get(1).unwrap().active);
    }

    #[test]
    fn test_reset_restores_canonical_options() {
        let mut set = PresetSet::from_loaded(Vec::new());

        // mangle the music preset
        let music = set.get_mut(1).unwrap();
        music.options.clear();
        music.add_option("--no-such-flag", "junk");
        music.toggle_option(0);

        assert!(set.reset_to_default(1));
        let restored = &set.get(1).unwrap().options;
        assert_eq!(restored.len(), 4);
        assert_eq!(restored[0].flag, "--extract-audio");
        assert_eq!(restored[2].flag, "--audio-quality 0");
        assert!(restored.iter().all(|o| o.enabled));

        // mutating the restored copy must not bleed into a later reset
        set.get_mut(1).unwrap().options[0].enabled = false;
        assert!(set.reset_to_default(1));
        assert!(set.get(1).unwrap().options[0].enabled);
    }

    #[test]
    fn test_reset_unknown_name_is_noop() {
        let mut set = PresetSet::from_loaded(vec![Preset::new("Custom"), Preset::new("Other")]);
        set.get_mut(0).unwrap().add_option("--keep-me", "");
        assert!(!set.reset_to_default(0));
        assert_eq!(set.get(0).unwrap().options.len(), 1);
    }

    #[test]
    fn test_reset_all() {
        let mut set = PresetSet::from_loaded(vec![Preset::new("Custom")]);
        set.reset_all();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(2).unwrap().name, "Low Quality");
    }
}
