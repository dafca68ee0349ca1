// src/graph/mod.rs
//! Dependency graph construction: one node per file, package nodes created
//! on first sight, edges with their reference kind preserved, then cycle
//! detection, orphan listing and fan-in/fan-out rankings.
//!
//! Per-file reference extraction is pure and runs in the parallel phase;
//! assembly here is a single-threaded merge because cycle detection needs the
//! whole graph.

pub mod cycles;
pub mod imports;
pub mod resolve;

use crate::config::GraphConfig;
use crate::intake::NormalizedFile;
use crate::types::{
    DependencyEdge, DependencyNode, DependencyReport, NodeKind, NodeRanking,
};
use imports::ImportRef;
use resolve::Resolution;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Builds the dependency report from per-file import references.
///
/// `refs` pairs each normalized file with the references extracted from it in
/// the parallel phase. A disabled graph (resolution backend unavailable)
/// yields the empty-default shape.
#[must_use]
pub fn build(
    files: &[NormalizedFile<'_>],
    refs: &[(usize, Vec<ImportRef>)],
    config: &GraphConfig,
) -> DependencyReport {
    if !config.enabled {
        return DependencyReport::default();
    }

    let ids: HashSet<String> = files.iter().map(|f| f.id.clone()).collect();
    let mut packages: Vec<String> = Vec::new();
    let mut edges: Vec<DependencyEdge> = Vec::new();
    let mut edge_keys: HashSet<(String, String)> = HashSet::new();

    for (file_idx, file_refs) in refs {
        let Some(file) = files.get(*file_idx) else {
            continue;
        };
        for import in file_refs {
            let Some(resolution) = resolve::resolve(&file.id, &import.specifier, &ids) else {
                continue;
            };
            let target = match resolution {
                Resolution::File(id) => id,
                Resolution::Package(name) => {
                    if !packages.contains(&name) {
                        packages.push(name.clone());
                    }
                    name
                }
            };
            if target == file.id {
                continue;
            }
            if edge_keys.insert((file.id.clone(), target.clone())) {
                edges.push(DependencyEdge {
                    from: file.id.clone(),
                    to: target,
                    kind: import.kind,
                });
            }
        }
    }

    let mut fan_in: HashMap<&str, usize> = HashMap::new();
    let mut fan_out: HashMap<&str, usize> = HashMap::new();
    for edge in &edges {
        *fan_out.entry(edge.from.as_str()).or_default() += 1;
        *fan_in.entry(edge.to.as_str()).or_default() += 1;
    }

    let mut nodes: Vec<DependencyNode> = files
        .iter()
        .map(|f| DependencyNode {
            id: f.id.clone(),
            kind: NodeKind::File,
            size: Some(f.content.len()),
            fan_in: fan_in.get(f.id.as_str()).copied().unwrap_or(0),
            fan_out: fan_out.get(f.id.as_str()).copied().unwrap_or(0),
        })
        .collect();
    nodes.extend(packages.iter().map(|name| DependencyNode {
        id: name.clone(),
        kind: NodeKind::Package,
        size: None,
        fan_in: fan_in.get(name.as_str()).copied().unwrap_or(0),
        fan_out: 0,
    }));

    // Cycles only make sense among files; package nodes have no out-edges.
    let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for node in &nodes {
        adjacency.entry(node.id.clone()).or_default();
    }
    for edge in &edges {
        if ids.contains(&edge.to) {
            if let Some(out) = adjacency.get_mut(&edge.from) {
                out.push(edge.to.clone());
            }
        }
    }
    let circular_dependencies = cycles::find_cycles(&adjacency);

    let orphan_files: Vec<String> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::File && n.fan_in == 0 && n.fan_out == 0)
        .map(|n| n.id.clone())
        .collect();

    let most_imported = rank(&nodes, config.ranking_size, |n| n.fan_in);
    let most_dependent = rank(&nodes, config.ranking_size, |n| n.fan_out);

    DependencyReport {
        nodes,
        edges,
        circular_dependencies,
        orphan_files,
        most_imported,
        most_dependent,
    }
}

fn rank(
    nodes: &[DependencyNode],
    size: usize,
    metric: impl Fn(&DependencyNode) -> usize,
) -> Vec<NodeRanking> {
    let mut ranked: Vec<NodeRanking> = nodes
        .iter()
        .filter(|n| metric(n) > 0)
        .map(|n| NodeRanking {
            id: n.id.clone(),
            count: metric(n),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(size);
    ranked
}
