// src/extract/heuristic.rs
//! Regex-based fallback strategy for languages without a grammar.
//!
//! Best-effort by design: misses are acceptable, false structure is not, so
//! every pattern anchors on a line start.

use super::complexity::{complexity_of, find_body_span, line_number, mask_code, split_params};
use super::{Parse, ParseFailure, PartialStructure};
use crate::intake::NormalizedFile;
use crate::types::{ClassInfo, FunctionInfo, InterfaceInfo, TypeAliasInfo};
use once_cell::sync::Lazy;
use regex::Regex;

// Group 1 is always the name, group 2 the parameter list.
static FUNCTIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // JS-family declarations and bound lambdas
        r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*(\([^)\n]*\))",
        r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(\([^)\n]*\)|[A-Za-z_$][\w$]*)\s*=>",
        // Python
        r"(?m)^[ \t]*(?:async\s+)?def\s+([A-Za-z_]\w*)\s*(\([^)\n]*\))",
        // Rust
        r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+([A-Za-z_]\w*)\s*(\([^)\n]*\))?",
        // Go
        r"(?m)^[ \t]*func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)\s*(\([^)\n]*\))",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid function pattern"))
    .collect()
});

static CLASSES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:export\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)(?:\s*\(([^)]*)\)\s*:|(?:\s+extends\s+([\w$.]+))?(?:\s+implements\s+([\w$ ,.]+))?)",
    )
    .expect("valid class pattern")
});

static INTERFACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:export\s+)?interface\s+(\w+)").expect("valid pattern"));

static TYPE_ALIASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export\s+)?type\s+(\w+)\s*=").expect("valid pattern")
});

static EXPORTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export\s+(?:const|let|var|function|class|interface|type)\s+|pub(?:\([^)]*\))?\s+(?:fn|struct|enum|trait)\s+)([A-Za-z_$][\w$]*)")
        .expect("valid pattern")
});

static PUB_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpub\b").expect("valid pattern"));

pub struct HeuristicStrategy;

impl Parse for HeuristicStrategy {
    fn parse(&self, file: &NormalizedFile<'_>) -> Result<PartialStructure, ParseFailure> {
        let masked = mask_code(file.content);
        let mut out = PartialStructure::default();

        for pattern in FUNCTIONS.iter() {
            for cap in pattern.captures_iter(&masked) {
                let whole = cap.get(0).map(|m| m.as_str()).unwrap_or_default();
                let Some(name) = cap.get(1) else { continue };
                let start = cap.get(0).map_or(0, |m| m.start());
                let start_line = line_number(file.content, start);
                if out.functions.iter().any(|f| f.start_line == start_line) {
                    continue;
                }

                let params = cap
                    .get(2)
                    .map(|m| split_params(m.as_str()))
                    .unwrap_or_default();
                let match_end = cap.get(0).map_or(start, |m| m.end());
                let (end_line, complexity) = body_metrics(file.content, &masked, start, match_end);

                out.functions.push(FunctionInfo {
                    name: name.as_str().to_string(),
                    file: file.path.clone(),
                    start_line,
                    end_line,
                    params,
                    return_type: return_type_after(&masked, match_end),
                    is_async: whole.contains("async "),
                    is_exported: whole.contains("export") || PUB_TOKEN.is_match(whole),
                    complexity,
                });
            }
        }
        out.functions.sort_by_key(|f| f.start_line);

        for cap in CLASSES.captures_iter(&masked) {
            let Some(name) = cap.get(1) else { continue };
            // Python-style bases land in group 2, JS/TS heritage in 3 and 4.
            let superclass = cap
                .get(3)
                .or_else(|| cap.get(2))
                .map(|m| m.as_str().split(',').next().unwrap_or("").trim().to_string())
                .filter(|s| !s.is_empty());
            let implements = cap
                .get(4)
                .map(|m| {
                    m.as_str()
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            out.classes.push(ClassInfo {
                name: name.as_str().to_string(),
                file: file.path.clone(),
                start_line: line_number(file.content, cap.get(0).map_or(0, |m| m.start())),
                methods: Vec::new(),
                superclass,
                implements,
            });
        }

        for cap in INTERFACES.captures_iter(&masked) {
            if let Some(name) = cap.get(1) {
                out.interfaces.push(InterfaceInfo {
                    name: name.as_str().to_string(),
                    file: file.path.clone(),
                });
            }
        }
        for cap in TYPE_ALIASES.captures_iter(&masked) {
            if let Some(name) = cap.get(1) {
                out.types.push(TypeAliasInfo {
                    name: name.as_str().to_string(),
                    file: file.path.clone(),
                });
            }
        }
        for cap in EXPORTS.captures_iter(&masked) {
            if let Some(name) = cap.get(1) {
                let name = name.as_str().to_string();
                if !out.exports.contains(&name) {
                    out.exports.push(name);
                }
            }
        }

        Ok(out)
    }
}

/// End line and complexity for a match: brace-matched body where one exists,
/// indentation-scoped body otherwise (Python and friends).
fn body_metrics(source: &str, masked: &str, start: usize, match_end: usize) -> (usize, u32) {
    if let Some((open, close)) = find_body_span(masked, match_end) {
        // Only trust the span when the brace opens close to the signature.
        if line_number(source, open) <= line_number(source, match_end) + 1 {
            let body = &masked[open..=close];
            return (line_number(source, close), complexity_of(body));
        }
    }
    indent_body_metrics(source, masked, start)
}

fn indent_body_metrics(source: &str, masked: &str, start: usize) -> (usize, u32) {
    let start_line = line_number(source, start);
    let lines: Vec<&str> = masked.lines().collect();
    let header_idx = start_line - 1;
    let header_indent = indent_of(lines.get(header_idx).copied().unwrap_or(""));

    let mut end_idx = header_idx;
    for (i, line) in lines.iter().enumerate().skip(header_idx + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) <= header_indent {
            break;
        }
        end_idx = i;
    }

    let body = lines[header_idx..=end_idx].join("\n");
    (end_idx + 1, complexity_of(&body))
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn return_type_after(masked: &str, match_end: usize) -> Option<String> {
    let rest = masked.get(match_end..)?;
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let tail = &rest[..line_end];
    let typed = tail
        .trim_start()
        .strip_prefix("->")
        .or_else(|| tail.trim_start().strip_prefix(':'))?;
    let cut = typed.find(['{', '=']).unwrap_or(typed.len());
    let t = typed[..cut].trim().trim_end_matches(':').trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str, content: &str) -> PartialStructure {
        let file = NormalizedFile {
            path: path.to_string(),
            id: crate::intake::module_id(path),
            lang: None,
            content,
        };
        HeuristicStrategy.parse(&file).unwrap()
    }

    #[test]
    fn extracts_python_functions_by_indentation() {
        let out = parse(
            "svc/job.py",
            "async def run(job):\n    if job.ready:\n        start(job)\n    return job\n\ndef stop(job):\n    job.halt()\n",
        );
        assert_eq!(out.functions.len(), 2);
        let run = &out.functions[0];
        assert_eq!(run.name, "run");
        assert!(run.is_async);
        assert_eq!(run.end_line, 4);
        assert_eq!(run.complexity, 2);
    }

    #[test]
    fn extracts_rust_functions_with_return_types() {
        let out = parse(
            "src/api.rs",
            "pub fn handle(req: Request) -> Response {\n    if req.ok { accept() } else { reject() }\n}\n",
        );
        assert_eq!(out.functions.len(), 1);
        let f = &out.functions[0];
        assert!(f.is_exported);
        assert_eq!(f.return_type.as_deref(), Some("Response"));
        assert_eq!(f.complexity, 2);
        assert!(out.exports.contains(&"handle".to_string()));
    }

    #[test]
    fn restricted_visibility_still_counts_as_exported() {
        let out = parse(
            "src/api.rs",
            "pub(crate) fn handle(req: Request) -> Response {\n    accept(req)\n}\n",
        );
        assert_eq!(out.functions.len(), 1);
        assert!(out.functions[0].is_exported);
        assert!(out.exports.contains(&"handle".to_string()));
    }

    #[test]
    fn extracts_python_classes_with_bases() {
        let out = parse("svc/models.py", "class Job(Task):\n    pass\n");
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].superclass.as_deref(), Some("Task"));
    }

    #[test]
    fn ignores_commented_out_code() {
        let out = parse("svc/a.py", "# def hidden():\n#     pass\ndef real():\n    pass\n");
        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "real");
    }
}
