// src/lang.rs
//! Language detection and tree-sitter grammar dispatch.
//!
//! Only the JS/TS family gets a strong grammar; everything else falls back to
//! the heuristic extraction strategy.

use tree_sitter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Detection for a normalized path, honoring a caller-supplied tag first.
    #[must_use]
    pub fn detect(path: &str, tag: Option<&str>) -> Option<Self> {
        if let Some(tag) = tag {
            match tag.to_ascii_lowercase().as_str() {
                "javascript" | "js" => return Some(Self::JavaScript),
                "typescript" | "ts" => return Some(Self::TypeScript),
                "tsx" => return Some(Self::Tsx),
                _ => {}
            }
        }
        let ext = path.rsplit('.').next()?;
        Self::from_ext(ext)
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Import references, with separate capture names per edge kind.
pub const IMPORTS_QUERY: &str = r#"
    (import_statement source: (string (string_fragment) @static))
    (export_statement source: (string (string_fragment) @static))
    (call_expression
      function: (identifier) @func
      arguments: (arguments (string (string_fragment) @require))
      (#eq? @func "require"))
    (call_expression
      function: (import)
      arguments: (arguments (string (string_fragment) @dynamic)))
"#;
