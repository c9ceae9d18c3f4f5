use crate::coord::{Coord, CoordId};
use crate::deps_map::DepsMap;
use crate::library::Lib;
use basis_util::errors::BasisError;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

pub type ExtensionResult<T> = Result<T, BasisError>;
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a coord's manifest classifies to: the schema used to read its
/// children, and the filesystem root to read it (and the children's own
/// manifests) from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    pub manifest: String,
    pub root: PathBuf,
}

/// A pluggable manifest-type/procurer provider, dispatched by tag through an
/// `ExtensionRegistry`. Every method receives the merged deps map so a
/// provider can read its own procurer-scoped config (e.g. `mvn/repos`)
/// without the core ever inspecting it.
///
/// `coord_deps` and `coord_paths` are the only members that do I/O; the rest
/// are pure/synchronous.
pub trait Extension: Send + Sync {
    /// Normalize shorthand into a canonical `(lib, coord)`, e.g. filling in a
    /// missing version from a configured default.
    fn canonicalize(&self, lib: &Lib, coord: &Coord, config: &DepsMap) -> ExtensionResult<(Lib, Coord)>;

    /// A stable identity for dominance comparison.
    fn dep_id(&self, lib: &Lib, coord: &Coord, config: &DepsMap) -> ExtensionResult<CoordId>;

    /// Classify how this coord's children should be read.
    fn manifest_type(&self, lib: &Lib, coord: &Coord, config: &DepsMap) -> ExtensionResult<ManifestInfo>;

    /// Read this coord's direct children.
    fn coord_deps<'a>(
        &'a self,
        lib: &'a Lib,
        coord: &'a Coord,
        manifest: &'a ManifestInfo,
        config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<(Lib, Coord)>>>;

    /// Procure (and, if necessary, fetch) this coord's local filesystem paths.
    fn coord_paths<'a>(
        &'a self,
        lib: &'a Lib,
        coord: &'a Coord,
        manifest: &'a ManifestInfo,
        config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<PathBuf>>>;

    /// Positive when `a` dominates `b`, matching `Ordering::Greater`'s sense.
    fn compare_versions(&self, lib: &Lib, a: &Coord, b: &Coord, config: &DepsMap) -> std::cmp::Ordering;

    /// A short human-readable rendering, used only by tree/why reporting.
    fn coord_summary(&self, lib: &Lib, coord: &Coord) -> String;
}
