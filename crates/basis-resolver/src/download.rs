//! Materialize local filesystem paths for every lib the expander selected:
//! one `coord_paths` task per lib, run on a bounded pool, failing the whole
//! batch on the first provider error rather than returning a partial map.

use std::collections::BTreeMap;
use std::sync::Arc;

use basis_core::{Coord, DepsMap, Lib, LibMap, ManifestInfo};
use basis_util::errors::BasisError;

use crate::executor::Executor;
use crate::registry::ExtensionRegistry;

/// Run `coord_paths` for every lib in `lib_map` concurrently. Returns the
/// per-lib coord with `paths` filled in; on the first failure the pool is
/// aborted and the error propagates.
pub async fn download_libs(
    registry: &ExtensionRegistry,
    config: &Arc<DepsMap>,
    lib_map: &LibMap,
    concurrency: usize,
) -> Result<BTreeMap<Lib, Coord>, BasisError> {
    let mut executor = Executor::new(concurrency);
    let mut fetches = Vec::with_capacity(lib_map.len());

    for (lib, entry) in lib_map.iter() {
        let ext = registry.get(entry.coord.tag()).ok_or_else(|| BasisError::Extension {
            message: format!("no extension registered for procurer {:?}", entry.coord.tag()),
        })?;
        let manifest = ManifestInfo {
            manifest: entry.coord.manifest.clone().unwrap_or_default(),
            root: entry.coord.root.clone().unwrap_or_default(),
        };
        let lib2 = lib.clone();
        let coord2 = entry.coord.clone();
        let config2 = Arc::clone(config);
        let fetch = executor.spawn(async move {
            ext.coord_paths(&lib2, &coord2, &manifest, &config2).await
        });
        fetches.push((lib.clone(), entry.coord.clone(), fetch));
    }

    let mut out = BTreeMap::new();
    for (lib, mut coord, fetch) in fetches {
        match fetch.await_result().await {
            Ok(Ok(paths)) => {
                coord.paths = paths;
                out.insert(lib, coord);
            }
            Ok(Err(e)) => {
                executor.shutdown();
                return Err(e);
            }
            Err(join_err) => {
                executor.shutdown();
                return Err(BasisError::Extension {
                    message: format!("download task failed: {join_err}"),
                });
            }
        }
    }
    Ok(out)
}
