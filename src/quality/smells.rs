// src/quality/smells.rs
//! Code-smell detection: an additional rule table over functions and raw
//! lines, each finding tagged minor/major/critical.

use crate::config::SmellConfig;
use crate::intake::NormalizedFile;
use crate::types::{CodeSmell, FunctionInfo, SmellSeverity};
use once_cell::sync::Lazy;
use regex::Regex;

static SUPPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"eslint-disable|@ts-ignore|@ts-nocheck|noqa|#\[allow\(|type:\s*ignore")
        .expect("valid pattern")
});

static TODO_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(TODO|FIXME|HACK|XXX)\b").expect("valid pattern"));

static CALLBACK_NEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s*\([^)]*\)\s*\{|\([^)]*\)\s*=>\s*\{").expect("valid pattern"));

/// Function-shape smells.
#[must_use]
pub fn function_smells(functions: &[FunctionInfo], config: &SmellConfig) -> Vec<CodeSmell> {
    let mut smells = Vec::new();
    for func in functions {
        let body_lines = func.end_line.saturating_sub(func.start_line);
        if body_lines > config.max_function_lines {
            smells.push(CodeSmell {
                kind: "long-function",
                severity: if body_lines > config.max_function_lines * 2 {
                    SmellSeverity::Critical
                } else {
                    SmellSeverity::Major
                },
                file: func.file.clone(),
                line: func.start_line,
                message: format!("{} spans {body_lines} lines", func.name),
            });
        }
        if func.params.len() > config.max_params {
            smells.push(CodeSmell {
                kind: "long-parameter-list",
                severity: SmellSeverity::Minor,
                file: func.file.clone(),
                line: func.start_line,
                message: format!("{} takes {} parameters", func.name, func.params.len()),
            });
        }
    }
    smells
}

/// Line-shape smells for one file.
#[must_use]
pub fn file_smells(file: &NormalizedFile<'_>, config: &SmellConfig) -> Vec<CodeSmell> {
    let mut smells = Vec::new();
    for (i, line) in file.content.lines().enumerate() {
        if SUPPRESSION.is_match(line) {
            smells.push(CodeSmell {
                kind: "suppressed-check",
                severity: SmellSeverity::Major,
                file: file.path.clone(),
                line: i + 1,
                message: "Lint or type check suppressed".to_string(),
            });
        }
        if TODO_MARKER.is_match(line) {
            smells.push(CodeSmell {
                kind: "todo-marker",
                severity: SmellSeverity::Minor,
                file: file.path.clone(),
                line: i + 1,
                message: "Unresolved TODO marker".to_string(),
            });
        }
        if line.matches(".then(").count() >= config.max_chain_depth {
            smells.push(CodeSmell {
                kind: "deep-promise-chain",
                severity: SmellSeverity::Major,
                file: file.path.clone(),
                line: i + 1,
                message: "Deeply chained promises".to_string(),
            });
        }
        if CALLBACK_NEST.find_iter(line).count() >= 3 {
            smells.push(CodeSmell {
                kind: "nested-callbacks",
                severity: SmellSeverity::Major,
                file: file.path.clone(),
                line: i + 1,
                message: "Nested callbacks on one line".to_string(),
            });
        }
    }
    smells
}
