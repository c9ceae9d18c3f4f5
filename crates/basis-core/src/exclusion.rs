use crate::ancestry::Ancestry;
use crate::library::Lib;
use std::collections::{BTreeMap, BTreeSet};

/// Per-path sets of libraries to omit from expansion beneath that path.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet(BTreeMap<Ancestry, BTreeSet<Lib>>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `libs` as excluded beneath (not at) `path`.
    pub fn add(&mut self, path: Ancestry, libs: BTreeSet<Lib>) {
        if libs.is_empty() {
            return;
        }
        self.0.entry(path).or_default().extend(libs);
    }

    /// True iff `lib` (ignoring any classifier suffix) is excluded by any
    /// prefix of `path`, including `path` itself.
    pub fn excluded(&self, path: &Ancestry, lib: &Lib) -> bool {
        let base = lib.without_classifier();
        path.prefixes()
            .any(|prefix| self.0.get(&prefix).is_some_and(|set| set.contains(&base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(s: &str) -> Lib {
        Lib::new(s).unwrap()
    }

    #[test]
    fn excludes_beneath_recorded_path_only() {
        let mut set = ExclusionSet::new();
        let a_path = Ancestry::top().extend(lib("g/a"));
        set.add(a_path.clone(), BTreeSet::from([lib("g/e")]));

        // excluded beneath a_path...
        let beneath = a_path.extend(lib("g/child"));
        assert!(set.excluded(&beneath, &lib("g/e")));

        // ...but not at an unrelated path.
        let other = Ancestry::top().extend(lib("g/b"));
        assert!(!set.excluded(&other, &lib("g/e")));
    }

    #[test]
    fn classifier_variants_share_exclusion() {
        let mut set = ExclusionSet::new();
        let path = Ancestry::top().extend(lib("g/a"));
        set.add(path.clone(), BTreeSet::from([lib("g/e")]));
        let beneath = path.extend(lib("g/child"));
        assert!(set.excluded(&beneath, &lib("g/e$sources")));
    }

    #[test]
    fn empty_exclusion_set_excludes_nothing() {
        let set = ExclusionSet::new();
        assert!(!set.excluded(&Ancestry::top(), &lib("g/a")));
    }
}
