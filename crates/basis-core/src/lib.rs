//! Core data model for the basis dependency resolver.
//!
//! This crate defines the types a breadth-first expander operates on: libs,
//! polymorphic coords, ancestry paths, the version map and its dominance
//! policy, exclusion sets, the terminal lib map, deps-map/alias merging, and
//! classpath assembly. It also defines the `Extension` trait that pluggable
//! manifest-type providers implement.
//!
//! This crate is intentionally free of async scheduling, process I/O, and
//! any concrete provider implementation; `basis-resolver` drives the
//! algorithm and `basis-maven` supplies the one reference provider.

pub mod alias;
pub mod ancestry;
pub mod classpath_map;
pub mod coord;
pub mod deps_map;
pub mod exclusion;
pub mod extension;
pub mod lib_map;
pub mod library;
pub mod version_map;

pub use ancestry::Ancestry;
pub use coord::{Coord, CoordId, ProcurerCoord};
pub use deps_map::DepsMap;
pub use exclusion::ExclusionSet;
pub use extension::{BoxFuture, Extension, ExtensionResult, ManifestInfo};
pub use lib_map::{LibEntry, LibMap};
pub use library::Lib;
pub use version_map::{AddOutcome, IncludeReason, OmitReason, VersionMap, VersionMapEntry};
