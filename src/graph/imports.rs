// src/graph/imports.rs
//! Extracts raw import references from file content, preserving how the
//! dependency is expressed (import / require / dynamic import).

use crate::intake::NormalizedFile;
use crate::lang::{Lang, IMPORTS_QUERY};
use crate::types::EdgeKind;
use once_cell::sync::Lazy;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// One unresolved reference: the specifier as written plus its edge kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    pub specifier: String,
    pub kind: EdgeKind,
}

/// Line-anchored fallback for languages without a grammar.
static FALLBACK_IMPORTS: Lazy<Vec<(Regex, EdgeKind)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r#"(?m)^\s*import\s+[\w{},*\s]*?from\s+['"]([^'"]+)['"]"#)
                .expect("valid pattern"),
            EdgeKind::Import,
        ),
        (
            Regex::new(r"(?m)^\s*(?:from\s+([\w.]+)\s+import|import\s+([\w.]+))")
                .expect("valid pattern"),
            EdgeKind::Import,
        ),
        (
            Regex::new(r#"(?m)^\s*use\s+([\w:]+)"#).expect("valid pattern"),
            EdgeKind::Import,
        ),
    ]
});

#[must_use]
pub fn extract(file: &NormalizedFile<'_>) -> Vec<ImportRef> {
    match file.lang {
        Some(lang) => query_imports(lang, file.content),
        None => fallback_imports(file.content),
    }
}

fn query_imports(lang: Lang, source: &str) -> Vec<ImportRef> {
    let grammar = lang.grammar();
    let mut parser = Parser::new();
    if parser.set_language(&grammar).is_err() {
        return Vec::new();
    }
    let Some(tree) = parser.parse(source, None) else {
        return Vec::new();
    };
    let Ok(query) = Query::new(&grammar, IMPORTS_QUERY) else {
        return Vec::new();
    };

    let names = query.capture_names();
    let mut refs = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let kind = match names.get(capture.index as usize).copied() {
                Some("static") => EdgeKind::Import,
                Some("require") => EdgeKind::Require,
                Some("dynamic") => EdgeKind::Dynamic,
                _ => continue,
            };
            if let Ok(text) = capture.node.utf8_text(source.as_bytes()) {
                refs.push(ImportRef {
                    specifier: clean_specifier(text),
                    kind,
                });
            }
        }
    }
    refs
}

fn fallback_imports(source: &str) -> Vec<ImportRef> {
    let mut refs = Vec::new();
    for (pattern, kind) in FALLBACK_IMPORTS.iter() {
        for cap in pattern.captures_iter(source) {
            let Some(m) = cap.get(1).or_else(|| cap.get(2)) else {
                continue;
            };
            let spec = clean_specifier(m.as_str());
            if refs.iter().any(|r: &ImportRef| r.specifier == spec) {
                continue;
            }
            refs.push(ImportRef {
                specifier: spec,
                kind: *kind,
            });
        }
    }
    refs
}

fn clean_specifier(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`' || c == ';' || c == ' ')
        .to_string()
}
