// src/graph/resolve.rs
//! Resolves an import specifier against the normalized in-memory file set.
//! No disk access: candidates are matched on module IDs.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file inside the analyzed set, by module ID.
    File(String),
    /// An external package, named by its root segment.
    Package(String),
}

#[must_use]
pub fn resolve(importer_id: &str, specifier: &str, ids: &HashSet<String>) -> Option<Resolution> {
    if specifier.starts_with('.') {
        return resolve_relative(importer_id, specifier, ids).map(Resolution::File);
    }
    Some(Resolution::Package(package_root(specifier)))
}

fn resolve_relative(importer_id: &str, specifier: &str, ids: &HashSet<String>) -> Option<String> {
    let base = match importer_id.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => "",
    };

    let mut segments: Vec<&str> = if base.is_empty() {
        Vec::new()
    } else {
        base.split('/').collect()
    };

    for part in specifier.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(part),
        }
    }

    let joined = segments.join("/");
    let candidate = crate::intake::module_id(&joined);
    if ids.contains(&candidate) {
        return Some(candidate);
    }
    None
}

/// First path segment of a package specifier; scoped npm packages keep two
/// segments, Rust-style paths stop at `::`.
fn package_root(specifier: &str) -> String {
    let specifier = specifier.split("::").next().unwrap_or(specifier);
    let mut parts = specifier.split('/');
    let first = parts.next().unwrap_or(specifier);
    if first.starts_with('@') {
        if let Some(second) = parts.next() {
            return format!("{first}/{second}");
        }
    }
    first.to_string()
}
