use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use basis_core::{
    BoxFuture, Coord, CoordId, DepsMap, Extension, ExtensionResult, Lib, ManifestInfo, ProcurerCoord,
};
use basis_resolver::{expand, ExpandArgs, ExtensionRegistry};

fn lib(s: &str) -> Lib {
    Lib::new(s).unwrap()
}

fn maven(version: &str) -> Coord {
    Coord::new(ProcurerCoord::Maven {
        version: Some(version.to_string()),
        repos: vec![],
    })
}

/// A fixed dependency graph keyed by `"group/artifact:version"`, with no
/// network or filesystem access, exercising `expand` the way two real
/// manifest fetches chained transitively would.
struct FixedGraphExtension(BTreeMap<String, Vec<(Lib, Coord)>>);

impl FixedGraphExtension {
    fn key(lib: &Lib, coord: &Coord) -> String {
        let version = match &coord.procurer {
            ProcurerCoord::Maven { version, .. } => version.clone().unwrap_or_default(),
            _ => String::new(),
        };
        format!("{lib}:{version}")
    }
}

impl Extension for FixedGraphExtension {
    fn canonicalize(&self, lib: &Lib, coord: &Coord, _config: &DepsMap) -> ExtensionResult<(Lib, Coord)> {
        Ok((lib.clone(), coord.clone()))
    }

    fn dep_id(&self, _lib: &Lib, coord: &Coord, _config: &DepsMap) -> ExtensionResult<CoordId> {
        let version = match &coord.procurer {
            ProcurerCoord::Maven { version, .. } => version.clone().unwrap_or_default(),
            _ => String::new(),
        };
        Ok(CoordId::new(version))
    }

    fn manifest_type(&self, _lib: &Lib, _coord: &Coord, _config: &DepsMap) -> ExtensionResult<ManifestInfo> {
        Ok(ManifestInfo {
            manifest: "pom".to_string(),
            root: PathBuf::new(),
        })
    }

    fn coord_deps<'a>(
        &'a self,
        lib: &'a Lib,
        coord: &'a Coord,
        _manifest: &'a ManifestInfo,
        _config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<(Lib, Coord)>>> {
        let key = Self::key(lib, coord);
        let children = self.0.get(&key).cloned().unwrap_or_default();
        Box::pin(async move { Ok(children) })
    }

    fn coord_paths<'a>(
        &'a self,
        _lib: &'a Lib,
        _coord: &'a Coord,
        _manifest: &'a ManifestInfo,
        _config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<PathBuf>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn compare_versions(&self, _lib: &Lib, a: &Coord, b: &Coord, _config: &DepsMap) -> Ordering {
        let v = |c: &Coord| match &c.procurer {
            ProcurerCoord::Maven { version, .. } => version.clone().unwrap_or_default().parse::<u32>().unwrap_or(0),
            _ => 0,
        };
        v(a).cmp(&v(b))
    }

    fn coord_summary(&self, lib: &Lib, coord: &Coord) -> String {
        Self::key(lib, coord)
    }
}

fn registry_with(graph: BTreeMap<String, Vec<(Lib, Coord)>>) -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    registry.register("maven", Arc::new(FixedGraphExtension(graph)));
    registry
}

/// `top -> a -> shared@1` and `top -> b -> shared@2`: the newer transitive
/// request wins regardless of which branch discovered it first, since
/// selection is driven by version dominance, not tree depth.
#[tokio::test]
async fn test_diamond_dependency_picks_the_newer_transitive_version() {
    let mut graph = BTreeMap::new();
    graph.insert("g/a:1".to_string(), vec![(lib("g/shared"), maven("1"))]);
    graph.insert("g/b:1".to_string(), vec![(lib("g/shared"), maven("2"))]);
    let registry = registry_with(graph);

    let mut top_deps = BTreeMap::new();
    top_deps.insert(lib("g/a"), maven("1"));
    top_deps.insert(lib("g/b"), maven("1"));

    let result = expand(
        &registry,
        ExpandArgs {
            config: Arc::new(DepsMap::new()),
            top_deps,
            override_deps: BTreeMap::new(),
            default_deps: BTreeMap::new(),
            concurrency: 4,
            trace: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(
        result.vmap.entry(&lib("g/shared")).unwrap().select,
        Some(CoordId::new("2"))
    );
}

/// An `override-deps` pin beats every transitive request for the same lib,
/// even one with a numerically newer version.
#[tokio::test]
async fn test_override_deps_beats_a_newer_transitive_request() {
    let mut graph = BTreeMap::new();
    graph.insert("g/a:1".to_string(), vec![(lib("g/shared"), maven("5"))]);
    let registry = registry_with(graph);

    let mut top_deps = BTreeMap::new();
    top_deps.insert(lib("g/a"), maven("1"));
    let mut override_deps = BTreeMap::new();
    override_deps.insert(lib("g/shared"), maven("1"));

    let result = expand(
        &registry,
        ExpandArgs {
            config: Arc::new(DepsMap::new()),
            top_deps,
            override_deps,
            default_deps: BTreeMap::new(),
            concurrency: 4,
            trace: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(
        result.vmap.entry(&lib("g/shared")).unwrap().select,
        Some(CoordId::new("1"))
    );
}

/// A top-level dep excluding a transitive lib stops that lib's whole
/// subtree from ever being queued, not merely its own occurrence.
#[tokio::test]
async fn test_exclusion_on_a_top_level_dep_drops_its_whole_subtree() {
    let mut graph = BTreeMap::new();
    graph.insert(
        "g/a:1".to_string(),
        vec![(lib("g/excluded"), maven("1"))],
    );
    graph.insert(
        "g/excluded:1".to_string(),
        vec![(lib("g/leaf"), maven("1"))],
    );
    let registry = registry_with(graph);

    let mut coord = maven("1");
    coord.exclusions.insert(lib("g/excluded"));
    let mut top_deps = BTreeMap::new();
    top_deps.insert(lib("g/a"), coord);

    let result = expand(
        &registry,
        ExpandArgs {
            config: Arc::new(DepsMap::new()),
            top_deps,
            override_deps: BTreeMap::new(),
            default_deps: BTreeMap::new(),
            concurrency: 4,
            trace: false,
        },
    )
    .await
    .unwrap();

    assert!(result.vmap.entry(&lib("g/excluded")).is_none());
    assert!(result.vmap.entry(&lib("g/leaf")).is_none());
}

/// When `trace` is requested, every include/omit decision is recorded in
/// BFS order, giving a caller the same debugging facility the original
/// system's resolution trace provides.
#[tokio::test]
async fn test_trace_records_every_include_and_omit_decision() {
    let mut graph = BTreeMap::new();
    graph.insert("g/a:1".to_string(), vec![(lib("g/shared"), maven("1"))]);
    graph.insert("g/b:1".to_string(), vec![(lib("g/shared"), maven("1"))]);
    let registry = registry_with(graph);

    let mut top_deps = BTreeMap::new();
    top_deps.insert(lib("g/a"), maven("1"));
    top_deps.insert(lib("g/b"), maven("1"));

    let result = expand(
        &registry,
        ExpandArgs {
            config: Arc::new(DepsMap::new()),
            top_deps,
            override_deps: BTreeMap::new(),
            default_deps: BTreeMap::new(),
            concurrency: 4,
            trace: true,
        },
    )
    .await
    .unwrap();

    let trace = result.trace.expect("trace was requested");
    let shared_entries: Vec<_> = trace.iter().filter(|e| e.lib == lib("g/shared")).collect();
    assert_eq!(shared_entries.len(), 2);
    assert!(shared_entries[0].included);
    assert!(!shared_entries[1].included);
}
