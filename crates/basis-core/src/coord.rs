use crate::library::Lib;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A procurer-tagged descriptor of how to obtain a specific instance of a
/// library. Each variant is owned by exactly one manifest-type extension;
/// the core never inspects variant fields beyond dispatching on the tag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "procurer", rename_all = "lowercase")]
pub enum ProcurerCoord {
    /// A Maven-layout artifact, resolved from one of `repos` by version.
    Maven {
        version: Option<String>,
        #[serde(default)]
        repos: Vec<String>,
    },
    /// A pre-built artifact living on the local filesystem.
    Local { root: PathBuf },
    /// A Git checkout pinned to a commit, optionally at a human-readable tag.
    Git {
        url: String,
        sha: String,
        #[serde(default)]
        tag: Option<String>,
    },
    /// Another project's manifest, resolved in place.
    Project { root: PathBuf },
}

impl ProcurerCoord {
    /// The registry dispatch tag for this coord's procurer.
    pub fn tag(&self) -> &'static str {
        match self {
            ProcurerCoord::Maven { .. } => "maven",
            ProcurerCoord::Local { .. } => "local",
            ProcurerCoord::Git { .. } => "git",
            ProcurerCoord::Project { .. } => "project",
        }
    }
}

/// A coord: a procurer-specific descriptor plus the cross-procurer fields
/// every coord carries (exclusions, and — once resolved — manifest/root).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    #[serde(flatten)]
    pub procurer: ProcurerCoord,
    #[serde(default)]
    pub exclusions: BTreeSet<Lib>,
    /// The manifest tag this coord was classified under, once known.
    #[serde(default)]
    pub manifest: Option<String>,
    /// The filesystem root to read the manifest/children from, once known.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Local filesystem paths materialized for this coord, once downloaded.
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl Coord {
    pub fn new(procurer: ProcurerCoord) -> Self {
        Coord {
            procurer,
            exclusions: BTreeSet::new(),
            manifest: None,
            root: None,
            paths: Vec::new(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: BTreeSet<Lib>) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn tag(&self) -> &'static str {
        self.procurer.tag()
    }
}

/// A procurer-determined value that canonically identifies a coord instance
/// for dominance comparison (e.g. a Maven coord-id is its version string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct CoordId(String);

impl CoordId {
    pub fn new(id: impl Into<String>) -> Self {
        CoordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
