//! Round-trip tests for the JSON configuration store.

use presetdl::preset::{default_presets, DownloadOption, Preset};
use presetdl::store::ConfigStore;
use tempfile::tempdir;

fn sample_presets() -> Vec<Preset> {
    let mut presets = default_presets();
    presets[1].active = true;
    presets[1].options[0].enabled = false;
    presets.push(Preset {
        name: "Archive".to_string(),
        active: false,
        options: vec![DownloadOption {
            flag: "--download-archive seen.txt".to_string(),
            comment: "Skip already-downloaded videos".to_string(),
            enabled: true,
        }],
    });
    presets
}

#[test]
fn test_save_and_reload_reproduces_state() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::open_at(temp_dir.path()).expect("Failed to open store");

    let urls = vec![
        "https://example.com/a".to_string(),
        "https://example.com/b".to_string(),
    ];
    let names = vec!["A".to_string(), "B".to_string()];
    let presets = sample_presets();

    store
        .save(&urls, &names, &presets)
        .expect("Failed to save config");

    let loaded = store.load().expect("Failed to load config");
    assert_eq!(loaded.history.urls, urls);
    assert_eq!(loaded.history.names, names);
    assert_eq!(loaded.presets, presets);

    // preset and option order must survive the round trip
    assert_eq!(loaded.presets[3].name, "Archive");
    assert_eq!(
        loaded.presets[1].options[0].flag,
        presets[1].options[0].flag
    );
    assert!(!loaded.presets[1].options[0].enabled);
}

#[test]
fn test_history_mismatch_repaired_on_save() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::open_at(temp_dir.path()).expect("Failed to open store");

    let urls = vec![
        "https://example.com/a".to_string(),
        "https://example.com/b".to_string(),
        "https://example.com/c".to_string(),
    ];
    let names = vec!["A".to_string()];

    store
        .save(&urls, &names, &default_presets())
        .expect("Failed to save config");

    let loaded = store.load().expect("Failed to load config");
    assert_eq!(loaded.history.urls.len(), loaded.history.names.len());
    assert_eq!(loaded.history.names[0], "A");
    assert_eq!(loaded.history.names[2], "");
}

#[test]
fn test_history_mismatch_repaired_on_load() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::open_at(temp_dir.path()).expect("Failed to open store");

    // a hand-edited file with more names than urls
    let raw = r#"{
  "history": {
    "urls": ["https://example.com/a"],
    "names": ["A", "B", "C"]
  },
  "presets": []
}"#;
    std::fs::write(store.path(), raw).expect("Failed to write config");

    let loaded = store.load().expect("Failed to load config");
    assert_eq!(loaded.history.urls.len(), 3);
    assert_eq!(loaded.history.urls[1], "");
}

#[test]
fn test_file_is_indented_json() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::open_at(temp_dir.path()).expect("Failed to open store");

    store
        .save(&[], &[], &default_presets())
        .expect("Failed to save config");

    let raw = std::fs::read_to_string(store.path()).expect("Failed to read config");
    assert!(raw.contains("\n  \"presets\""));
    assert!(raw.contains("\n      \"name\""));
    assert!(raw.contains("\n          \"flag\""));
}
