//! Breadth-first dependency expansion: the algorithm that turns a set of
//! top-level deps into a terminal version map.
//!
//! The queue holds two kinds of element: a concrete dependency occurrence
//! still waiting to be checked against `include_decision`/`add_coord`, or a
//! pending node whose children are still being fetched on the executor.
//! Pending nodes are drained into a scratch queue ahead of fresh work so
//! that a coord's children are processed as a contiguous breadth-first
//! level, not interleaved with unrelated top-level deps still queued
//! behind it.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use basis_core::{AddOutcome, Ancestry, Coord, DepsMap, ExclusionSet, Lib, VersionMap};
use basis_util::errors::BasisError;

use crate::executor::{Executor, PendingFetch};
use crate::include::{self, Decision};
use crate::registry::ExtensionRegistry;

/// Safety valve against a pathological or cyclic provider graph. Real runs
/// terminate long before this: `vmap` selections only ever move forward.
const MAX_ITERATIONS: u64 = 200_000;

/// A dependency occurrence still waiting to be processed. `parents` is its
/// ancestry *excluding* `lib` itself; `coord` is `None` when the occurrence
/// carried no explicit coord and must fall back to a default.
struct QueueDep {
    parents: Ancestry,
    lib: Lib,
    coord: Option<Coord>,
}

enum QueueItem {
    Dep(QueueDep),
    Pending {
        fetch: PendingFetch<Result<Vec<(Lib, Coord)>, BasisError>>,
        ppath: Ancestry,
    },
}

/// One decision the expander made, recorded when `trace` is requested.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub path: Ancestry,
    pub lib: Lib,
    pub included: bool,
    pub reason: &'static str,
}

pub struct ExpandArgs {
    pub config: Arc<DepsMap>,
    pub top_deps: BTreeMap<Lib, Coord>,
    pub override_deps: BTreeMap<Lib, Coord>,
    pub default_deps: BTreeMap<Lib, Coord>,
    pub concurrency: usize,
    pub trace: bool,
}

pub struct ExpandResult {
    pub vmap: VersionMap,
    pub exclusions: ExclusionSet,
    pub trace: Option<Vec<TraceEntry>>,
}

/// Run breadth-first expansion to a terminal version map.
pub async fn expand(registry: &ExtensionRegistry, args: ExpandArgs) -> Result<ExpandResult, BasisError> {
    let mut vmap = VersionMap::new();
    let mut exclusions = ExclusionSet::new();
    let mut q: VecDeque<QueueItem> = VecDeque::new();
    let mut pendq: VecDeque<QueueDep> = VecDeque::new();
    let mut executor = Executor::new(args.concurrency);
    let mut trace = args.trace.then(Vec::new);

    for (lib, coord) in &args.top_deps {
        q.push_back(QueueItem::Dep(QueueDep {
            parents: Ancestry::top(),
            lib: lib.clone(),
            coord: Some(coord.clone()),
        }));
    }

    let mut iterations: u64 = 0;
    loop {
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            executor.shutdown();
            return Err(BasisError::Cycle { iterations });
        }

        let Some(dep) = next_dep(&mut pendq, &mut q, &mut executor).await? else {
            break;
        };

        if let Err(e) = process_dep(
            dep,
            registry,
            &args.config,
            &args.override_deps,
            &args.default_deps,
            &mut vmap,
            &mut exclusions,
            &mut q,
            &mut executor,
            &mut trace,
        ) {
            executor.shutdown();
            return Err(e);
        }
    }

    Ok(ExpandResult { vmap, exclusions, trace })
}

/// Pop the next dependency occurrence to process: the scratch queue's head
/// if nonempty, else the main queue's head — awaiting and flattening any
/// pending node found there until a concrete occurrence surfaces (or both
/// queues are empty).
async fn next_dep(
    pendq: &mut VecDeque<QueueDep>,
    q: &mut VecDeque<QueueItem>,
    executor: &mut Executor,
) -> Result<Option<QueueDep>, BasisError> {
    loop {
        if let Some(dep) = pendq.pop_front() {
            return Ok(Some(dep));
        }
        let Some(item) = q.pop_front() else {
            return Ok(None);
        };
        match item {
            QueueItem::Dep(dep) => return Ok(Some(dep)),
            QueueItem::Pending { fetch, ppath } => {
                let children = match fetch.await_result().await {
                    Ok(Ok(children)) => children,
                    Ok(Err(e)) => return Err(e),
                    Err(join_err) => {
                        return Err(BasisError::Extension {
                            message: format!("child-fetch task failed: {join_err}"),
                        });
                    }
                };
                for (lib, coord) in children {
                    pendq.push_back(QueueDep { parents: ppath.clone(), lib, coord: Some(coord) });
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn process_dep(
    dep: QueueDep,
    registry: &ExtensionRegistry,
    config: &Arc<DepsMap>,
    override_deps: &BTreeMap<Lib, Coord>,
    default_deps: &BTreeMap<Lib, Coord>,
    vmap: &mut VersionMap,
    exclusions: &mut ExclusionSet,
    q: &mut VecDeque<QueueItem>,
    executor: &mut Executor,
    trace: &mut Option<Vec<TraceEntry>>,
) -> Result<(), BasisError> {
    let QueueDep { parents, lib, coord } = dep;

    match include::include_decision(vmap, &lib, &parents, exclusions) {
        Decision::Omit(reason) => {
            push_trace(trace, &parents, &lib, false, reason.as_str());
            tracing::trace!(%parents, %lib, reason = reason.as_str(), "omitted");
            return Ok(());
        }
        Decision::Include(_) => {}
    }

    // override-deps[lib] > the occurrence's own coord > default-deps[lib].
    let use_coord = override_deps
        .get(&lib)
        .cloned()
        .or(coord)
        .or_else(|| default_deps.get(&lib).cloned());

    let Some(use_coord) = use_coord else {
        return Err(BasisError::Input {
            message: format!("{lib} has neither an explicit nor a default coord"),
        });
    };

    let ext = registry.get(use_coord.tag()).ok_or_else(|| BasisError::Extension {
        message: format!("no extension registered for procurer {:?}", use_coord.tag()),
    })?;

    let (lib, mut use_coord) = ext.canonicalize(&lib, &use_coord, config)?;
    let cid = ext.dep_id(&lib, &use_coord, config)?;
    let manifest = ext.manifest_type(&lib, &use_coord, config)?;
    use_coord.manifest = Some(manifest.manifest.clone());
    use_coord.root = Some(manifest.root.clone());

    let use_path = parents.extend(lib.clone());
    let is_top = parents.is_top();

    let compare = {
        let ext = Arc::clone(&ext);
        let lib = lib.clone();
        let config = Arc::clone(config);
        move |a: &Coord, b: &Coord| ext.compare_versions(&lib, a, b, &config)
    };

    let outcome = vmap.add_coord(&lib, cid, use_coord.clone(), use_path.clone(), is_top, compare);

    match outcome {
        AddOutcome::Include(_) => {
            exclusions.add(use_path.clone(), use_coord.exclusions.clone());

            let ext = Arc::clone(&ext);
            let lib2 = lib.clone();
            let coord2 = use_coord.clone();
            let config2 = Arc::clone(config);
            let fetch = executor.spawn(async move {
                let children = ext.coord_deps(&lib2, &coord2, &manifest, &config2).await?;
                let mut canon = Vec::with_capacity(children.len());
                for (child_lib, child_coord) in children {
                    canon.push(ext.canonicalize(&child_lib, &child_coord, &config2)?);
                }
                Ok(canon)
            });

            q.push_back(QueueItem::Pending { fetch, ppath: use_path.clone() });
            push_trace(trace, &parents, &lib, true, "choose-version");
            tracing::trace!(%parents, %lib, coord = ?use_coord, "included");
        }
        AddOutcome::Omit(_) => {
            push_trace(trace, &parents, &lib, false, "dominance");
            tracing::trace!(%parents, %lib, "dominated by an earlier selection");
        }
    }

    Ok(())
}

fn push_trace(trace: &mut Option<Vec<TraceEntry>>, path: &Ancestry, lib: &Lib, included: bool, reason: &'static str) {
    if let Some(entries) = trace {
        entries.push(TraceEntry { path: path.clone(), lib: lib.clone(), included, reason });
    }
}
