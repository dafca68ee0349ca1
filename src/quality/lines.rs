// src/quality/lines.rs
//! Line classification by trimmed-prefix inspection.

use crate::types::LineMetrics;

#[must_use]
pub fn measure(content: &str) -> LineMetrics {
    let mut metrics = LineMetrics::default();
    for line in content.lines() {
        metrics.total += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            metrics.blank += 1;
        } else if is_comment(trimmed) {
            metrics.comment += 1;
        } else {
            metrics.code += 1;
        }
    }
    metrics
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with('#')
}

/// Merges per-file metrics into a whole-run total.
#[must_use]
pub fn merge(parts: impl IntoIterator<Item = LineMetrics>) -> LineMetrics {
    let mut out = LineMetrics::default();
    for part in parts {
        out.total += part.total;
        out.code += part.code;
        out.comment += part.comment;
        out.blank += part.blank;
    }
    out
}
