// src/graph/cycles.rs
//! Cycle detection over the dependency graph: iterative depth-first search
//! with an explicit frame stack, so pathological graphs cannot exhaust the
//! call stack.

use std::collections::{BTreeMap, HashSet};

/// Finds circular dependencies. Each cycle is a closed path of two or more
/// distinct node IDs; cycles are canonicalized (rotated to their smallest
/// node) and deduplicated, so DFS root order does not affect the output.
#[must_use]
pub fn find_cycles(adjacency: &BTreeMap<String, Vec<String>>) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut seen_cycles = HashSet::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for root in adjacency.keys() {
        if visited.contains(root.as_str()) {
            continue;
        }

        // Frame: node plus the index of the next neighbor to explore.
        let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
        let mut path: Vec<&str> = vec![root.as_str()];
        let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);
        visited.insert(root.as_str());

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let (node, idx) = (frame.0, frame.1);
            frame.1 += 1;

            let neighbors = adjacency.get(node).map_or(&[][..], Vec::as_slice);
            let Some(next) = neighbors.get(idx) else {
                stack.pop();
                path.pop();
                on_path.remove(node);
                continue;
            };

            if on_path.contains(next.as_str()) {
                record_cycle(&path, next, &mut seen_cycles, &mut cycles);
                continue;
            }
            if visited.contains(next.as_str()) {
                continue;
            }

            visited.insert(next.as_str());
            on_path.insert(next.as_str());
            path.push(next.as_str());
            stack.push((next.as_str(), 0));
        }
    }

    cycles
}

/// Emits the sub-path from the first occurrence of `target` to the current
/// node, rotated so the smallest ID leads.
fn record_cycle(
    path: &[&str],
    target: &str,
    seen: &mut HashSet<Vec<String>>,
    cycles: &mut Vec<Vec<String>>,
) {
    let Some(pos) = path.iter().position(|&n| n == target) else {
        return;
    };
    let segment = &path[pos..];
    if segment.len() < 2 {
        // Self-import; not a cycle of distinct nodes.
        return;
    }

    let min_idx = (0..segment.len())
        .min_by_key(|&i| segment[i])
        .unwrap_or(0);
    let canonical: Vec<String> = segment[min_idx..]
        .iter()
        .chain(segment[..min_idx].iter())
        .map(ToString::to_string)
        .collect();

    if seen.insert(canonical.clone()) {
        cycles.push(canonical);
    }
}
