// src/extract/tree.rs
//! Tree-sitter extraction strategy for the JS/TS family.

use super::complexity::{complexity_of, mask_code, split_params};
use super::{Parse, ParseFailure, PartialStructure};
use crate::intake::NormalizedFile;
use crate::lang::Lang;
use crate::types::{ClassInfo, FunctionInfo, InterfaceInfo, TypeAliasInfo};
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::{Node, Parser};

static COMMONJS_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:module\.)?exports(?:\.([A-Za-z_$][\w$]*))?\s*=").expect("valid pattern")
});

pub struct TreeStrategy {
    lang: Lang,
}

impl TreeStrategy {
    #[must_use]
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }
}

impl Parse for TreeStrategy {
    fn parse(&self, file: &NormalizedFile<'_>) -> Result<PartialStructure, ParseFailure> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.lang.grammar())
            .map_err(|e| ParseFailure {
                path: file.path.clone(),
                detail: e.to_string(),
            })?;

        let tree = parser.parse(file.content, None).ok_or_else(|| ParseFailure {
            path: file.path.clone(),
            detail: "parser produced no tree".to_string(),
        })?;

        let mut ctx = WalkContext {
            source: file.content,
            path: &file.path,
            out: PartialStructure::default(),
        };
        walk(tree.root_node(), false, &mut ctx);

        for cap in COMMONJS_EXPORT.captures_iter(file.content) {
            let name = cap.get(1).map_or("default", |m| m.as_str());
            push_unique(&mut ctx.out.exports, name);
        }

        Ok(ctx.out)
    }
}

struct WalkContext<'a> {
    source: &'a str,
    path: &'a str,
    out: PartialStructure,
}

fn walk(node: Node, exported: bool, ctx: &mut WalkContext<'_>) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(func) = read_function(node, node, exported, ctx) {
                if exported {
                    push_unique(&mut ctx.out.exports, &func.name);
                }
                ctx.out.functions.push(func);
            }
            return;
        }
        "variable_declarator" => {
            if let Some(value) = node.child_by_field_name("value") {
                if matches!(value.kind(), "arrow_function" | "function_expression") {
                    if let Some(func) = read_function(node, value, exported, ctx) {
                        if exported {
                            push_unique(&mut ctx.out.exports, &func.name);
                        }
                        ctx.out.functions.push(func);
                    }
                    return;
                }
            }
        }
        "class_declaration" => {
            read_class(node, exported, ctx);
            return;
        }
        "interface_declaration" => {
            if let Some(name) = field_text(node, "name", ctx.source) {
                ctx.out.interfaces.push(InterfaceInfo {
                    name: name.to_string(),
                    file: ctx.path.to_string(),
                });
                if exported {
                    push_unique(&mut ctx.out.exports, name);
                }
            }
            return;
        }
        "type_alias_declaration" => {
            if let Some(name) = field_text(node, "name", ctx.source) {
                ctx.out.types.push(TypeAliasInfo {
                    name: name.to_string(),
                    file: ctx.path.to_string(),
                });
                if exported {
                    push_unique(&mut ctx.out.exports, name);
                }
            }
            return;
        }
        "export_statement" => {
            read_export_clause(node, ctx);
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk(child, true, ctx);
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, exported, ctx);
    }
}

/// Reads a function from `decl` (carries the name) and `def` (carries the
/// signature and body; identical for plain declarations).
fn read_function(
    decl: Node,
    def: Node,
    exported: bool,
    ctx: &WalkContext<'_>,
) -> Option<FunctionInfo> {
    let name = field_text(decl, "name", ctx.source)?;

    // Arrow functions with a single bare argument use the `parameter` field.
    let params = def
        .child_by_field_name("parameters")
        .or_else(|| def.child_by_field_name("parameter"))
        .and_then(|p| p.utf8_text(ctx.source.as_bytes()).ok())
        .map(split_params)
        .unwrap_or_default();

    let return_type = def
        .child_by_field_name("return_type")
        .and_then(|r| r.utf8_text(ctx.source.as_bytes()).ok())
        .map(|t| t.trim_start_matches(':').trim().to_string());

    let body_text = def
        .child_by_field_name("body")
        .and_then(|b| b.utf8_text(ctx.source.as_bytes()).ok())
        .unwrap_or("");

    Some(FunctionInfo {
        name: name.to_string(),
        file: ctx.path.to_string(),
        start_line: decl.start_position().row + 1,
        end_line: def.end_position().row + 1,
        params,
        return_type,
        is_async: has_async_keyword(def),
        is_exported: exported,
        complexity: complexity_of(&mask_code(body_text)),
    })
}

fn read_class(node: Node, exported: bool, ctx: &mut WalkContext<'_>) {
    let Some(name) = field_text(node, "name", ctx.source) else {
        return;
    };
    let class_name = name.to_string();

    let (superclass, implements) = read_heritage(node, ctx.source);

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            if member.kind() != "method_definition" {
                continue;
            }
            let Some(method_name) = field_text(member, "name", ctx.source) else {
                continue;
            };
            methods.push(method_name.to_string());
            if let Some(mut func) = read_function(member, member, exported, ctx) {
                func.name = format!("{class_name}.{method_name}");
                ctx.out.functions.push(func);
            }
        }
    }

    if exported {
        push_unique(&mut ctx.out.exports, &class_name);
    }
    ctx.out.classes.push(ClassInfo {
        name: class_name,
        file: ctx.path.to_string(),
        start_line: node.start_position().row + 1,
        methods,
        superclass,
        implements,
    });
}

/// Parses `extends X implements A, B` textually; the heritage node shape
/// differs between the JS and TS grammars.
fn read_heritage(node: Node, source: &str) -> (Option<String>, Vec<String>) {
    let mut heritage_text = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_heritage" {
            heritage_text = child.utf8_text(source.as_bytes()).ok();
        }
    }
    let Some(text) = heritage_text else {
        return (None, Vec::new());
    };

    let (extends_part, implements_part) = match text.split_once("implements") {
        Some((e, i)) => (e, Some(i)),
        None => (text, None),
    };

    let superclass = extends_part
        .trim()
        .strip_prefix("extends")
        .map(|s| s.trim().trim_end_matches(',').to_string())
        .filter(|s| !s.is_empty());

    let implements = implements_part
        .map(|part| {
            part.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    (superclass, implements)
}

fn read_export_clause(node: Node, ctx: &mut WalkContext<'_>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "export_clause" => {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() == "export_specifier" {
                        if let Some(name) = field_text(spec, "name", ctx.source) {
                            push_unique(&mut ctx.out.exports, name);
                        }
                    }
                }
            }
            "default" => push_unique(&mut ctx.out.exports, "default"),
            _ => {}
        }
    }
}

fn has_async_keyword(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "async");
    found
}

fn field_text<'a>(node: Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)?
        .utf8_text(source.as_bytes())
        .ok()
}

fn push_unique(exports: &mut Vec<String>, name: &str) {
    if !exports.iter().any(|e| e == name) {
        exports.push(name.to_string());
    }
}
