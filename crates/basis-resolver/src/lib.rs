//! Breadth-first dependency expander: pluggable manifest-type extensions,
//! non-Maven-nearest-wins version selection, concurrent fetch scheduling,
//! and classpath assembly.
//!
//! `basis-core` owns the data model this crate operates on (libs, coords,
//! the version map and its dominance policy, ancestry/exclusion tracking,
//! alias composition, classpath assembly); this crate drives the algorithm
//! end to end and supplies the concurrency/scheduling machinery around it.

pub mod basis;
pub mod conflict;
pub mod download;
pub mod executor;
pub mod expander;
pub mod include;
pub mod registry;
pub mod tree;

pub use basis::{calc_basis, Basis, ResolveArgs};
pub use conflict::{ConflictReport, VersionConflict};
pub use expander::{expand, ExpandArgs, ExpandResult, TraceEntry};
pub use registry::ExtensionRegistry;
