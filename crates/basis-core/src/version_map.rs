use crate::ancestry::Ancestry;
use crate::coord::{Coord, CoordId};
use crate::library::Lib;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Per-library working state: every candidate coord ever seen, the ancestry
/// paths that contributed each, and the currently selected coord-id.
#[derive(Debug, Clone, Default)]
pub struct VersionMapEntry {
    pub versions: BTreeMap<CoordId, Coord>,
    pub paths: BTreeMap<CoordId, BTreeSet<Ancestry>>,
    pub select: Option<CoordId>,
    pub top: bool,
}

/// The outcome of attempting to add a coord occurrence to the version map,
/// mirroring the decision `include?`/`add-coord` surface to the expander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Include(IncludeReason),
    Omit(OmitReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeReason {
    NewTopDep,
    NewDep,
    NewerVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitReason {
    SameVersion,
    OlderVersion,
}

/// Mapping from `lib` to its version-map entry.
#[derive(Debug, Clone, Default)]
pub struct VersionMap(BTreeMap<Lib, VersionMapEntry>);

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, lib: &Lib) -> Option<&VersionMapEntry> {
        self.0.get(lib)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Lib, &VersionMapEntry)> {
        self.0.iter()
    }

    /// Record a coord occurrence for `lib` and apply the dominance policy.
    ///
    /// `is_top` marks this occurrence as introduced at the empty path; top
    /// deps are sticky against every transitive contribution. `compare`
    /// returns `Greater` when `a` dominates `b` (the extension's
    /// `compare-versions`, already bound to this lib).
    pub fn add_coord(
        &mut self,
        lib: &Lib,
        cid: CoordId,
        coord: Coord,
        path: Ancestry,
        is_top: bool,
        compare: impl Fn(&Coord, &Coord) -> Ordering,
    ) -> AddOutcome {
        let entry = self.0.entry(lib.clone()).or_default();
        entry.versions.insert(cid.clone(), coord.clone());
        entry.paths.entry(cid.clone()).or_default().insert(path);

        if is_top {
            entry.select = Some(cid);
            entry.top = true;
            return AddOutcome::Include(IncludeReason::NewTopDep);
        }

        match entry.select.clone() {
            None => {
                entry.select = Some(cid);
                AddOutcome::Include(IncludeReason::NewDep)
            }
            Some(selected) if selected == cid => AddOutcome::Omit(OmitReason::SameVersion),
            Some(selected) => {
                let selected_coord = entry
                    .versions
                    .get(&selected)
                    .expect("selected coord-id always has a recorded coord")
                    .clone();
                match compare(&coord, &selected_coord) {
                    Ordering::Greater => {
                        entry.select = Some(cid);
                        AddOutcome::Include(IncludeReason::NewerVersion)
                    }
                    _ => AddOutcome::Omit(OmitReason::OlderVersion),
                }
            }
        }
    }
}
