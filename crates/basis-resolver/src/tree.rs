//! ASCII dependency-tree and "why" rendering, walking a `LibMap` directly.
//! `LibEntry::dependents` only records the reverse edge (who pulled a lib
//! in); rendering a top-down tree inverts that once into a children map,
//! then recurses. No graph library involved.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use basis_core::{Lib, LibMap, ProcurerCoord};

/// Render the dependency tree rooted at `roots`, one line per lib, indented
/// by depth.
pub fn render_tree(lib_map: &LibMap, roots: &[Lib]) -> String {
    let children = invert_dependents(lib_map);
    let mut out = String::new();
    for root in roots {
        let mut ancestors = Vec::new();
        render_node(lib_map, &children, root, 0, &mut out, &mut ancestors);
    }
    out
}

fn invert_dependents(lib_map: &LibMap) -> BTreeMap<Lib, Vec<Lib>> {
    let mut children: BTreeMap<Lib, Vec<Lib>> = BTreeMap::new();
    for (lib, entry) in lib_map.iter() {
        for dependent in &entry.dependents {
            children.entry(dependent.clone()).or_default().push(lib.clone());
        }
    }
    children
}

fn coord_version(entry: &basis_core::LibEntry) -> String {
    match &entry.coord.procurer {
        ProcurerCoord::Maven { version, .. } => version.clone().unwrap_or_default(),
        ProcurerCoord::Git { sha, .. } => sha.clone(),
        ProcurerCoord::Local { root } | ProcurerCoord::Project { root } => root.display().to_string(),
    }
}

fn render_node(
    lib_map: &LibMap,
    children: &BTreeMap<Lib, Vec<Lib>>,
    lib: &Lib,
    depth: usize,
    out: &mut String,
    ancestors: &mut Vec<Lib>,
) {
    let version = lib_map.get(lib).map(coord_version).unwrap_or_default();
    let _ = writeln!(out, "{}{} {}", "  ".repeat(depth), lib, version);

    if ancestors.contains(lib) {
        let _ = writeln!(out, "{}  ... (cycle, omitted)", "  ".repeat(depth));
        return;
    }
    ancestors.push(lib.clone());
    if let Some(kids) = children.get(lib) {
        for kid in kids {
            render_node(lib_map, children, kid, depth + 1, out, ancestors);
        }
    }
    ancestors.pop();
}

/// Every chain of dependents from `target` back up to a lib with no further
/// dependents — a top-level lib, or one only ever introduced at the top.
pub fn why(lib_map: &LibMap, target: &Lib) -> Vec<Vec<Lib>> {
    let mut chains = Vec::new();
    let mut stack = vec![vec![target.clone()]];
    while let Some(chain) = stack.pop() {
        let head = chain.last().expect("chain always has at least target").clone();
        let dependents = lib_map.get(&head).map(|e| e.dependents.clone()).unwrap_or_default();
        if dependents.is_empty() {
            chains.push(chain);
            continue;
        }
        for dependent in dependents {
            if chain.contains(&dependent) {
                chains.push(chain.clone());
                continue;
            }
            let mut next = chain.clone();
            next.push(dependent);
            stack.push(next);
        }
    }
    chains
}
