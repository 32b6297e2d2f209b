//! History naming for completed downloads
//!
//! The download tool decides the output file name on its own, so after a
//! successful run the freshest file in the working tree is taken as the
//! history entry; when nothing qualifies, a display name is derived from
//! the URL instead.

use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// Name of the newest file under `dir` modified after `after`, ignoring
/// dot-entries and `.log` files. `None` when nothing qualifies.
pub fn find_downloaded_file(dir: &Path, after: SystemTime) -> Option<String> {
    let mut newest: Option<(String, SystemTime)> = None;
    scan_dir(dir, after, &mut newest);
    if newest.is_none() {
        debug!("no file newer than download start under {}", dir.display());
    }
    newest.map(|(name, _)| name)
}

fn scan_dir(dir: &Path, after: SystemTime, newest: &mut Option<(String, SystemTime)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if path.is_dir() {
            scan_dir(&path, after, newest);
            continue;
        }
        if name.ends_with(".log") {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        if modified > after && newest.as_ref().map_or(true, |(_, t)| modified > *t) {
            *newest = Some((name.to_string(), modified));
        }
    }
}

/// Fallback display name derived from the URL when the downloaded file
/// cannot be located.
pub fn display_name_for_url(url: &str) -> String {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        if let Some(id) = youtube_video_id(url) {
            if id.len() > 8 {
                if let Some(prefix) = id.get(..8) {
                    return format!("YouTube_{prefix}");
                }
            }
        }
        return "YouTube_video".to_string();
    }

    if let Some((_, rest)) = url.split_once("://") {
        let host = rest.split('/').next().unwrap_or_default();
        let host = host.trim_start_matches("www.");
        if !host.is_empty() {
            return format!("{}_video", capitalize(host));
        }
    }

    "video".to_string()
}

fn youtube_video_id(url: &str) -> Option<&str> {
    if let Some((_, rest)) = url.split_once("v=") {
        return rest.split('&').next();
    }
    if let Some((_, rest)) = url.split_once("youtu.be/") {
        return rest.split('?').next();
    }
    None
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
