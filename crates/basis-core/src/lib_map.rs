use crate::coord::Coord;
use crate::library::Lib;
use crate::version_map::VersionMap;
use std::collections::BTreeMap;

/// A lib's resolved coord plus the libs that depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibEntry {
    pub coord: Coord,
    /// Direct dependents, one per ancestry path that selected this lib's
    /// current coord-id, excluding top-level occurrences (empty ancestry).
    /// Ordered deterministically since `VersionMapEntry::paths` is a
    /// `BTreeSet<Ancestry>`.
    pub dependents: Vec<Lib>,
}

/// Final projection of a version map: exactly one coord per lib.
#[derive(Debug, Clone, Default)]
pub struct LibMap(BTreeMap<Lib, LibEntry>);

impl LibMap {
    pub fn get(&self, lib: &Lib) -> Option<&LibEntry> {
        self.0.get(lib)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Lib, &LibEntry)> {
        self.0.iter()
    }

    pub fn libs(&self) -> impl Iterator<Item = &Lib> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert_for_test(&mut self, lib: Lib, entry: LibEntry) {
        self.0.insert(lib, entry);
    }

    /// Replace a lib's coord in place, e.g. to attach downloaded paths
    /// (§4.7) without re-running the version-map projection.
    pub fn set_coord(&mut self, lib: &Lib, coord: Coord) {
        if let Some(entry) = self.0.get_mut(lib) {
            entry.coord = coord;
        }
    }
}

/// Project a terminal version map to a lib map: for each lib, its selected
/// coord plus the ordered list of dependents that contributed a path to it.
pub fn project(vmap: &VersionMap) -> LibMap {
    let mut out = BTreeMap::new();
    for (lib, entry) in vmap.iter() {
        let Some(select) = &entry.select else {
            continue;
        };
        let coord = entry
            .versions
            .get(select)
            .expect("selected coord-id always has a recorded coord")
            .clone();
        let dependents = entry
            .paths
            .get(select)
            .into_iter()
            .flatten()
            .filter_map(|path| path.last().cloned())
            .collect();
        out.insert(lib.clone(), LibEntry { coord, dependents });
    }
    LibMap(out)
}
