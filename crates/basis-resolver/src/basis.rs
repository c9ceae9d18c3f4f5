//! Top-level orchestration: merge deps maps, compose aliases, expand the
//! dependency graph, download artifacts, and assemble the classpath. This
//! is the single entry point a caller drives the whole resolve-then-build-a-
//! classpath pipeline through.

use std::collections::BTreeMap;
use std::sync::Arc;

use basis_core::alias::combine_aliases;
use basis_core::classpath_map::{assemble_classpath, ClasspathArgs, ClasspathMap};
use basis_core::deps_map::merge_edns;
use basis_core::{lib_map, Coord, DepsMap, Lib, LibMap};
use basis_util::errors::BasisError;

use crate::conflict::ConflictReport;
use crate::download::download_libs;
use crate::expander::{expand, ExpandArgs, TraceEntry};
use crate::registry::ExtensionRegistry;

/// Options accepted at resolve time, on top of what the merged deps map and
/// selected aliases already contribute.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    pub extra_deps: BTreeMap<Lib, Coord>,
    pub override_deps: BTreeMap<Lib, Coord>,
    pub default_deps: BTreeMap<Lib, Coord>,
    pub aliases: Vec<String>,
    /// Bounded worker-pool width; `0` means "pick from available parallelism".
    pub concurrency: usize,
    pub trace: bool,
}

/// The result of a full `calc_basis` call.
#[derive(Debug)]
pub struct Basis {
    pub lib_map: LibMap,
    pub classpath: ClasspathMap,
    pub conflicts: ConflictReport,
    pub trace: Option<Vec<TraceEntry>>,
}

/// Run merge → alias composition → expand → lib-map projection → download →
/// classpath assembly for a sequence of deps maps (read order matters: later
/// maps win on key collision, per `merge_edns`).
pub async fn calc_basis(
    registry: &ExtensionRegistry,
    edns: &[DepsMap],
    resolve_args: ResolveArgs,
    classpath_args: ClasspathArgs,
) -> Result<Basis, BasisError> {
    let merged = merge_edns(edns);
    let config = Arc::new(merged.clone());

    let composed = combine_aliases(&merged, &resolve_args.aliases)
        .map_err(|message| BasisError::Input { message })?;

    let mut top_deps = merged.deps.clone();
    top_deps.extend(composed.extra_deps.clone());
    top_deps.extend(resolve_args.extra_deps.clone());

    let mut override_deps = composed.override_deps.clone();
    override_deps.extend(resolve_args.override_deps.clone());

    let mut default_deps = composed.default_deps.clone();
    default_deps.extend(resolve_args.default_deps.clone());

    let concurrency = if resolve_args.concurrency == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
    } else {
        resolve_args.concurrency
    };

    let expand_result = expand(
        registry,
        ExpandArgs {
            config: Arc::clone(&config),
            top_deps,
            override_deps,
            default_deps,
            concurrency,
            trace: resolve_args.trace,
        },
    )
    .await?;

    let conflicts = ConflictReport::from_version_map(&expand_result.vmap);
    let mut lib_map = lib_map::project(&expand_result.vmap);

    let downloaded = download_libs(registry, &config, &lib_map, concurrency).await?;
    for (lib, coord) in downloaded {
        lib_map.set_coord(&lib, coord);
    }

    let classpath = assemble_classpath(&merged.paths, &lib_map, &composed, &classpath_args);

    Ok(Basis { lib_map, classpath, conflicts, trace: expand_result.trace })
}
