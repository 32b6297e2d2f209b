//! Conflict-resolving merge of preset options and ad-hoc flags.
//!
//! Everything funnels through one keyed map: enabled options of active
//! presets first, command-line tokens second, each insertion overwriting
//! any earlier entry with the same flag key. The result therefore never
//! contains two options for the same flag.

use super::{DownloadOption, Preset};
use std::collections::BTreeMap;
use tracing::debug;

/// Comment attached to options synthesized from command-line tokens.
pub const CLI_COMMENT: &str = "From CLI arguments";

/// Identity of a flag string: the part before `=` of its first
/// whitespace-delimited token, e.g. `--format` for `--format=best` and
/// `--audio-quality` for `--audio-quality 0`.
///
/// `None` when the string is blank or the key would be empty; such options
/// never enter the merge.
pub fn flag_key(flag: &str) -> Option<&str> {
    let first = flag.split_whitespace().next()?;
    let key = first.split_once('=').map_or(first, |(key, _)| key);
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Resolves the option set for one invocation.
///
/// Precedence, lowest to highest: earlier active preset, later active
/// preset, earlier option within a preset, later option within a preset,
/// extra argument. Disabled options and inactive presets are excluded
/// entirely.
///
/// Extra tokens are scanned left to right: a token not starting with `-`
/// is ignored, a token containing `=` is self-contained, and a bare flag
/// consumes the following token as its value when that token exists and
/// does not start with `-`. A flag left dangling at the end of the list
/// stands alone.
///
/// The result is sorted by flag key, so a given input always produces the
/// same argument order. Callers must still treat it as a set.
pub fn resolve(presets: &[Preset], extra_args: &[String]) -> Vec<DownloadOption> {
    let mut merged: BTreeMap<String, DownloadOption> = BTreeMap::new();

    for preset in presets.iter().filter(|p| p.active) {
        for option in preset.options.iter().filter(|o| o.enabled) {
            if let Some(key) = flag_key(&option.flag) {
                merged.insert(key.to_string(), option.clone());
            }
        }
    }

    let mut i = 0;
    while i < extra_args.len() {
        let token = &extra_args[i];
        i += 1;

        if !token.starts_with('-') {
            continue;
        }

        let (key, full_flag) = if let Some((key, _)) = token.split_once('=') {
            (key.to_string(), token.clone())
        } else if extra_args.get(i).is_some_and(|next| !next.starts_with('-')) {
            let full = format!("{} {}", token, extra_args[i]);
            i += 1;
            (token.clone(), full)
        } else {
            (token.clone(), token.clone())
        };

        merged.insert(
            key,
            DownloadOption {
                flag: full_flag,
                comment: CLI_COMMENT.to_string(),
                enabled: true,
            },
        );
    }

    if !extra_args.is_empty() {
        let flags: Vec<&str> = merged.values().map(|o| o.flag.as_str()).collect();
        debug!("merged flags: {}", flags.join(" "));
    }

    merged.into_values().collect()
}
