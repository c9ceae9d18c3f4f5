//! The pure decision the expander consults before a dependency occurrence
//! ever reaches `VersionMap::add_coord`: whether this occurrence should be
//! expanded at all, independent of version dominance.

use basis_core::{Ancestry, ExclusionSet, Lib, VersionMap};

/// Whether a dependency occurrence at `path` should be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Include(IncludeReason),
    Omit(OmitReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeReason {
    /// `path` is empty: this is a top-level dep.
    Top,
    /// Falls through every other rule to ordinary version dominance.
    ChooseVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitReason {
    /// Excluded by some enclosing path's exclusion set.
    Excluded,
    /// `lib` was already pinned as a top-level dep; transitive occurrences
    /// never get a say.
    UseTop,
    /// `lib`'s immediate parent in `path` is no longer on the selected
    /// path for its own coord-id, so this occurrence is stale.
    ParentOmitted,
}

impl IncludeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeReason::Top => "top",
            IncludeReason::ChooseVersion => "choose-version",
        }
    }
}

impl OmitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OmitReason::Excluded => "excluded",
            OmitReason::UseTop => "use-top",
            OmitReason::ParentOmitted => "parent-omitted",
        }
    }
}

/// Decide whether `lib`, encountered at ancestry `path` (excluding `lib`
/// itself), should be expanded. Checked before dominance, in this order:
/// top-level, excluded, already-pinned-at-top, parent-stale, else proceed.
pub fn include_decision(
    vmap: &VersionMap,
    lib: &Lib,
    path: &Ancestry,
    exclusions: &ExclusionSet,
) -> Decision {
    if path.is_top() {
        return Decision::Include(IncludeReason::Top);
    }
    if exclusions.excluded(path, lib) {
        return Decision::Omit(OmitReason::Excluded);
    }
    if vmap.entry(lib).is_some_and(|entry| entry.top) {
        return Decision::Omit(OmitReason::UseTop);
    }

    let Some((grandparent_path, parent_lib)) = path.split_last() else {
        return Decision::Include(IncludeReason::ChooseVersion);
    };
    let parent_still_selected = vmap
        .entry(parent_lib)
        .and_then(|parent_entry| {
            parent_entry
                .select
                .as_ref()
                .and_then(|selected| parent_entry.paths.get(selected))
        })
        .is_some_and(|selected_paths| selected_paths.contains(&grandparent_path));

    if parent_still_selected {
        Decision::Include(IncludeReason::ChooseVersion)
    } else {
        Decision::Omit(OmitReason::ParentOmitted)
    }
}
