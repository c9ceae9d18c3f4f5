use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for the basis resolver and its extensions.
#[derive(Debug, Error, Diagnostic)]
pub enum BasisError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A deps map or alias was malformed: an unknown alias key, a coord
    /// missing both an explicit and a default version, an unqualified lib
    /// name, or similar.
    #[error("input error: {message}")]
    #[diagnostic(help("check the deps map and aliases passed to the resolver"))]
    Input { message: String },

    /// A manifest-type extension raised while classifying, reading children
    /// of, or procuring paths for a coord.
    #[error("extension error: {message}")]
    Extension { message: String },

    /// The version map reached a state its own invariants forbid, e.g. a
    /// selected coord whose ancestry is no longer selected. Indicates a bug
    /// in the expander, not a user-facing input problem.
    #[error("resolution invariant violated: {message}")]
    Invariant { message: String },

    /// The expander exceeded its iteration cap without draining its queue.
    #[error("dependency graph did not terminate within {iterations} iterations")]
    Cycle { iterations: u64 },

    /// Network request or artifact download failed.
    #[error("network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type BasisResult<T> = miette::Result<T>;
