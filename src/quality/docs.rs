// src/quality/docs.rs
//! Documentation coverage: a function or class counts as documented iff the
//! line immediately above it closes a block comment or is itself a comment
//! line. Blank lines break the adjacency.

use crate::types::DocumentationReport;

/// `decl_lines` are 1-based start lines of functions and classes in one file.
#[must_use]
pub fn measure(content: &str, decl_lines: &[usize]) -> DocumentationReport {
    let lines: Vec<&str> = content.lines().collect();
    let mut documented = 0usize;
    let mut undocumented = 0usize;

    for &decl in decl_lines {
        if decl >= 2 && is_doc_line(lines.get(decl - 2).copied().unwrap_or("")) {
            documented += 1;
        } else {
            undocumented += 1;
        }
    }

    report(documented, undocumented)
}

fn is_doc_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.ends_with("*/")
        || trimmed.starts_with("///")
        || trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.ends_with("\"\"\"")
}

/// Merges per-file counts into the run-level report.
#[must_use]
pub fn merge(parts: impl IntoIterator<Item = DocumentationReport>) -> DocumentationReport {
    let mut documented = 0;
    let mut undocumented = 0;
    for part in parts {
        documented += part.documented;
        undocumented += part.undocumented;
    }
    report(documented, undocumented)
}

fn report(documented: usize, undocumented: usize) -> DocumentationReport {
    let total = documented + undocumented;
    let coverage = if total == 0 {
        0.0
    } else {
        (documented as f64 / total as f64) * 100.0
    };
    DocumentationReport {
        coverage,
        documented,
        undocumented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsdoc_block_above_counts_as_documented() {
        let content = "/**\n * Loads a user.\n */\nfunction load() {}\n";
        let m = measure(content, &[4]);
        assert_eq!(m.documented, 1);
        assert!((m.coverage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_line_breaks_adjacency() {
        let content = "/** doc */\n\nfunction load() {}\n";
        let m = measure(content, &[3]);
        assert_eq!(m.documented, 0);
        assert!(m.coverage.abs() < f64::EPSILON);
    }

    #[test]
    fn first_line_declarations_are_undocumented() {
        let m = measure("function a() {}\n", &[1]);
        assert_eq!(m.undocumented, 1);
    }

    #[test]
    fn mixed_coverage_is_a_ratio() {
        let content = "// doc\nfunction a() {}\nfunction b() {}\n";
        let m = measure(content, &[2, 3]);
        assert_eq!(m.documented, 1);
        assert_eq!(m.undocumented, 1);
        assert!((m.coverage - 50.0).abs() < f64::EPSILON);
    }
}
