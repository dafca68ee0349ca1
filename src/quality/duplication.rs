// src/quality/duplication.rs
//! Duplicate-block detection: a fixed-height window slides over each file,
//! short blocks are skipped, and normalized block text is hashed with SHA-256.
//! Any digest seen more than once marks its lines duplicated.
//!
//! Normalization is whitespace-trim only; identifier renames are not folded.

use crate::config::DuplicationConfig;
use crate::types::DuplicationReport;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Window occurrences for one file, produced in the parallel phase.
#[derive(Debug, Default)]
pub struct FileWindows {
    /// (digest, first line of the window, window height)
    pub windows: Vec<([u8; 32], usize, usize)>,
    pub scanned_lines: usize,
}

#[must_use]
pub fn collect_windows(content: &str, config: &DuplicationConfig) -> FileWindows {
    let lines: Vec<&str> = content.lines().collect();
    let mut out = FileWindows {
        windows: Vec::new(),
        scanned_lines: lines.len(),
    };
    if lines.len() < config.window {
        return out;
    }

    for start in 0..=(lines.len() - config.window) {
        let block: Vec<&str> = lines[start..start + config.window]
            .iter()
            .map(|l| l.trim())
            .collect();
        let normalized = block.join("\n");
        if normalized.len() < config.min_block_chars {
            continue;
        }
        let digest: [u8; 32] = Sha256::digest(normalized.as_bytes()).into();
        out.windows.push((digest, start + 1, config.window));
    }
    out
}

/// Reduces per-file windows into the run-level duplication report.
#[must_use]
pub fn reduce(per_file: &[(usize, FileWindows)]) -> DuplicationReport {
    let mut counts: HashMap<[u8; 32], usize> = HashMap::new();
    let mut total_lines = 0usize;
    for (_, fw) in per_file {
        total_lines += fw.scanned_lines;
        for (digest, _, _) in &fw.windows {
            *counts.entry(*digest).or_default() += 1;
        }
    }

    let duplicated_blocks = counts.values().filter(|&&c| c > 1).count();

    // Mark duplicated lines per file so overlapping windows never double count.
    let mut duplicated_lines = 0usize;
    for (_, fw) in per_file {
        let mut marked: Vec<bool> = vec![false; fw.scanned_lines + 1];
        for (digest, first_line, height) in &fw.windows {
            if counts.get(digest).copied().unwrap_or(0) > 1 {
                for line in *first_line..(*first_line + *height).min(marked.len()) {
                    marked[line] = true;
                }
            }
        }
        duplicated_lines += marked.iter().filter(|&&m| m).count();
    }

    let percentage = if total_lines == 0 {
        0.0
    } else {
        (duplicated_lines as f64 / total_lines as f64) * 100.0
    };

    DuplicationReport {
        percentage,
        duplicated_blocks,
        duplicated_lines,
    }
}
