// src/intake.rs
//! File intake: filters the raw snapshot and normalizes paths into
//! comparable module IDs. Unmatched files are silently dropped; oversized or
//! minified-looking files are dropped with a warning.

use crate::config::{IntakeConfig, LimitsConfig};
use crate::lang::Lang;
use crate::types::SourceFile;
use log::warn;

/// A filtered input file with its normalized module identity.
#[derive(Debug)]
pub struct NormalizedFile<'a> {
    /// Forward-slash path as supplied (minus any leading `./`).
    pub path: String,
    /// Comparable ID: path with the source extension stripped and a trailing
    /// `/index` collapsed.
    pub id: String,
    pub lang: Option<Lang>,
    pub content: &'a str,
}

pub struct IntakeOutcome<'a> {
    pub files: Vec<NormalizedFile<'a>>,
    pub warnings: Vec<String>,
}

#[must_use]
pub fn normalize<'a>(
    input: &'a [SourceFile],
    intake: &IntakeConfig,
    limits: &LimitsConfig,
) -> IntakeOutcome<'a> {
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for source in input {
        let path = clean_path(&source.path);
        if !has_allowed_extension(&path, &intake.extensions) {
            continue;
        }
        if is_excluded(&path, &intake.exclude) {
            continue;
        }
        if source.size() > limits.max_file_bytes {
            let msg = format!("{path}: skipped, {} bytes exceeds limit", source.size());
            warn!("{msg}");
            warnings.push(msg);
            continue;
        }
        if looks_minified(&source.content, limits.minified_avg_line_chars) {
            let msg = format!("{path}: skipped, looks minified or generated");
            warn!("{msg}");
            warnings.push(msg);
            continue;
        }

        let id = module_id(&path);
        if !seen.insert(id.clone()) {
            continue;
        }

        let lang = Lang::detect(&path, source.language.as_deref());
        files.push(NormalizedFile {
            path,
            id,
            lang,
            content: &source.content,
        });
    }

    IntakeOutcome { files, warnings }
}

fn clean_path(path: &str) -> String {
    let slashed = path.replace('\\', "/");
    slashed
        .strip_prefix("./")
        .map_or(slashed.clone(), ToString::to_string)
}

fn has_allowed_extension(path: &str, extensions: &[String]) -> bool {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    extensions.iter().any(|e| e == ext)
}

/// Exclusion check: dotted patterns (`.test.`, `.min.`) match anywhere in the
/// path, plain names must match a whole path segment so that `dist` does not
/// swallow `src/distance.ts`.
#[must_use]
pub fn is_excluded(path: &str, segments: &[String]) -> bool {
    segments.iter().any(|s| {
        if s.contains('.') {
            path.contains(s.as_str())
        } else {
            path.split('/').any(|part| part == s)
        }
    })
}

fn looks_minified(content: &str, avg_limit: usize) -> bool {
    let mut lines = 0usize;
    let mut chars = 0usize;
    for line in content.lines() {
        lines += 1;
        chars += line.len();
    }
    lines > 0 && chars / lines > avg_limit
}

/// Normalizes a cleaned path into a module ID.
#[must_use]
pub fn module_id(path: &str) -> String {
    let mut id = path.to_string();
    if let Some((stem, ext)) = id.rsplit_once('.') {
        if crate::config::SOURCE_EXTENSIONS.contains(&ext) {
            id = stem.to_string();
        }
    }
    if let Some(stripped) = id.strip_suffix("/index") {
        id = stripped.to_string();
    }
    id
}
