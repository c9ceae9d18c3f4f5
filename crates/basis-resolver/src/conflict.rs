//! Version-conflict reporting: which libraries had more than one candidate
//! coord-id during expansion, and which one dominance ultimately selected.

use std::fmt;

use basis_core::{CoordId, Lib, VersionMap};

/// A report of every library that had more than one candidate coord-id.
#[derive(Debug, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<VersionConflict>,
}

/// A single library for which the version map recorded more than one
/// candidate coord-id.
#[derive(Debug, Clone)]
pub struct VersionConflict {
    pub lib: Lib,
    pub resolved: CoordId,
    pub others: Vec<CoordId>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// Scan a version map for libraries with more than one candidate
    /// coord-id, reporting each alongside dominance's pick.
    pub fn from_version_map(vmap: &VersionMap) -> Self {
        let mut report = ConflictReport::new();
        for (lib, entry) in vmap.iter() {
            if entry.versions.len() <= 1 {
                continue;
            }
            let Some(selected) = entry.select.clone() else {
                continue;
            };
            let mut others: Vec<CoordId> = entry
                .versions
                .keys()
                .filter(|id| **id != selected)
                .cloned()
                .collect();
            others.sort();
            report.conflicts.push(VersionConflict {
                lib: lib.clone(),
                resolved: selected,
                others,
            });
        }
        report
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let others: Vec<String> = self.others.iter().map(CoordId::to_string).collect();
        write!(
            f,
            "{}: selected {} over {}",
            self.lib,
            self.resolved,
            others.join(", ")
        )
    }
}
