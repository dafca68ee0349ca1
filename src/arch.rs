// src/arch.rs
//! Architecture overview: path-heuristic layering, design-pattern signature
//! detection, HTTP endpoint listing and layer-to-layer data flow. Purely
//! additive; a pattern that is not found simply produces nothing.

use crate::intake::NormalizedFile;
use crate::types::{
    ArchitectureInfo, ClassInfo, DataFlowEdge, DependencyEdge, DetectedPattern, EndpointInfo,
    LayerInfo,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub const LAYERS: &[(&str, &[&str])] = &[
    ("presentation", &["component", "page", "view", "screen", "ui"]),
    ("business", &["service", "controller", "handler", "api", "route"]),
    ("data", &["model", "schema", "repository", "db", "store", "entity"]),
    ("shared", &["util", "helper", "lib", "common", "type"]),
];

static ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:app|router|server)\.(get|post|put|delete|patch)\s*\(\s*["'`]([^"'`]+)"#)
        .expect("valid endpoint pattern")
});

static GET_INSTANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bgetInstance\s*\(").expect("valid pattern"));
static PRIVATE_CTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"private\s+constructor\s*\(").expect("valid pattern"));
static FACTORY_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:function\s+|const\s+)((?:create|make)[A-Z]\w*)").expect("valid pattern")
});
static SUBSCRIBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(subscribe|on|addListener)\s*\(").expect("valid pattern"));
static NOTIFY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(notify|emit|publish)\s*\(").expect("valid pattern"));

/// Classifies a module path into a layer, or `None` when nothing matches.
#[must_use]
pub fn layer_of(path: &str) -> Option<&'static str> {
    let lower = path.to_ascii_lowercase();
    for (layer, needles) in LAYERS {
        if needles.iter().any(|n| lower.contains(n)) {
            return Some(layer);
        }
    }
    None
}

#[must_use]
pub fn detect(files: &[NormalizedFile<'_>], edges: &[DependencyEdge]) -> ArchitectureInfo {
    let mut layer_files: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    let mut layer_by_id: BTreeMap<&str, &'static str> = BTreeMap::new();
    let mut endpoints = Vec::new();

    for file in files {
        if let Some(layer) = layer_of(&file.path) {
            layer_files.entry(layer).or_default().push(file.path.clone());
            layer_by_id.insert(file.id.as_str(), layer);
        }

        for (i, line) in file.content.lines().enumerate() {
            if let Some(cap) = ENDPOINT.captures(line) {
                endpoints.push(EndpointInfo {
                    method: cap[1].to_ascii_uppercase(),
                    path: cap[2].to_string(),
                    file: file.path.clone(),
                    line: i + 1,
                });
            }
        }
    }

    let layers = layer_files
        .into_iter()
        .map(|(name, mut files)| {
            files.sort();
            LayerInfo { name, files }
        })
        .collect();

    let data_flow = flow_between_layers(edges, &layer_by_id);

    ArchitectureInfo {
        layers,
        endpoints,
        data_flow,
    }
}

/// Detected design patterns for the run, separate from the architecture
/// overview in the final result.
#[must_use]
pub fn patterns(files: &[NormalizedFile<'_>], classes: &[ClassInfo]) -> Vec<DetectedPattern> {
    let mut out = Vec::new();
    for file in files {
        detect_patterns(file, classes, &mut out);
    }
    out
}

fn detect_patterns(
    file: &NormalizedFile<'_>,
    classes: &[ClassInfo],
    out: &mut Vec<DetectedPattern>,
) {
    let content = file.content;

    if GET_INSTANCE.is_match(content) && PRIVATE_CTOR.is_match(content) {
        push_once(out, "Singleton", file, "getInstance with a private constructor");
    }

    if let Some(cap) = FACTORY_FN.captures(content) {
        if content.contains("new ") || content.contains("return {") {
            let evidence = format!("creation function {}", &cap[1]);
            push_once_owned(out, "Factory", file, evidence);
        }
    }

    if SUBSCRIBE.is_match(content) && NOTIFY.is_match(content) {
        push_once(out, "Observer", file, "subscribe/notify pairing");
    }

    for class in classes.iter().filter(|c| c.file == file.path) {
        if class.name.contains("Repository") || class.name.ends_with("Repo") {
            let evidence = format!("data-access class {}", class.name);
            push_once_owned(out, "Repository", file, evidence);
        }
        if class.name.ends_with("Factory") {
            let evidence = format!("creation class {}", class.name);
            push_once_owned(out, "Factory", file, evidence);
        }
    }
}

fn push_once(
    out: &mut Vec<DetectedPattern>,
    name: &'static str,
    file: &NormalizedFile<'_>,
    evidence: &str,
) {
    push_once_owned(out, name, file, evidence.to_string());
}

fn push_once_owned(
    out: &mut Vec<DetectedPattern>,
    name: &'static str,
    file: &NormalizedFile<'_>,
    evidence: String,
) {
    if out.iter().any(|p| p.name == name && p.file == file.path) {
        return;
    }
    out.push(DetectedPattern {
        name,
        file: file.path.clone(),
        evidence,
    });
}

fn flow_between_layers(
    edges: &[DependencyEdge],
    layer_by_id: &BTreeMap<&str, &'static str>,
) -> Vec<DataFlowEdge> {
    let mut counts: BTreeMap<(&'static str, &'static str), usize> = BTreeMap::new();
    for edge in edges {
        let (Some(&from), Some(&to)) = (
            layer_by_id.get(edge.from.as_str()),
            layer_by_id.get(edge.to.as_str()),
        ) else {
            continue;
        };
        if from != to {
            *counts.entry((from, to)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|((from_layer, to_layer), count)| DataFlowEdge {
            from_layer,
            to_layer,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeKind;

    fn file(path: &'static str, content: &'static str) -> NormalizedFile<'static> {
        NormalizedFile {
            path: path.to_string(),
            id: crate::intake::module_id(path),
            lang: crate::lang::Lang::detect(path, None),
            content,
        }
    }

    #[test]
    fn layers_classify_by_path_substrings() {
        assert_eq!(layer_of("src/components/Button.tsx"), Some("presentation"));
        assert_eq!(layer_of("src/services/billing.ts"), Some("business"));
        assert_eq!(layer_of("src/models/user.ts"), Some("data"));
        assert_eq!(layer_of("src/utils/format.ts"), Some("shared"));
        assert_eq!(layer_of("src/app.ts"), None);
    }

    #[test]
    fn endpoints_are_listed_with_verbs() {
        let files = vec![file(
            "src/routes/user.ts",
            "router.get('/users/:id', show);\nrouter.post('/users', create);\n",
        )];
        let arch = detect(&files, &[]);
        assert_eq!(arch.endpoints.len(), 2);
        assert_eq!(arch.endpoints[0].method, "GET");
        assert_eq!(arch.endpoints[0].path, "/users/:id");
    }

    #[test]
    fn singleton_needs_both_signals() {
        let with_both = vec![file(
            "src/services/cache.ts",
            "class Cache {\n  private constructor() {}\n  static getInstance() { return inst; }\n}",
        )];
        assert!(patterns(&with_both, &[]).iter().any(|p| p.name == "Singleton"));

        let only_get = vec![file("src/services/other.ts", "api.getInstance();")];
        assert!(patterns(&only_get, &[]).is_empty());
    }

    #[test]
    fn observer_pairing_is_detected() {
        let files = vec![file(
            "src/services/bus.ts",
            "bus.on('evt', handler);\nbus.emit('evt', data);\n",
        )];
        assert!(patterns(&files, &[]).iter().any(|p| p.name == "Observer"));
    }

    #[test]
    fn data_flow_counts_cross_layer_edges() {
        let files = vec![
            file("src/components/App.tsx", ""),
            file("src/services/api.ts", ""),
        ];
        let edges = vec![DependencyEdge {
            from: "src/components/App".to_string(),
            to: "src/services/api".to_string(),
            kind: EdgeKind::Import,
        }];
        let arch = detect(&files, &edges);
        assert_eq!(arch.data_flow.len(), 1);
        assert_eq!(arch.data_flow[0].from_layer, "presentation");
        assert_eq!(arch.data_flow[0].to_layer, "business");
        assert_eq!(arch.data_flow[0].count, 1);
    }
}
