use crate::alias::ComposedAliases;
use crate::library::Lib;
use crate::lib_map::LibMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What contributed a classpath entry: a resolved lib, or an alias key that
/// was chased down to a literal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathSource {
    Lib(Lib),
    AliasKey(String),
}

/// An ordered mapping of filesystem path to what contributed it. Key order
/// defines classpath order; a path is never repeated (first contributor
/// wins the display slot, matching `lib-paths`' insertion-order semantics).
#[derive(Debug, Clone, Default)]
pub struct ClasspathMap {
    order: Vec<PathBuf>,
    sources: BTreeMap<PathBuf, ClasspathSource>,
}

impl ClasspathMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, source: ClasspathSource) {
        if self.sources.contains_key(&path) {
            return;
        }
        self.sources.insert(path.clone(), source);
        self.order.push(path);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Path, &ClasspathSource)> {
        self.order.iter().map(|p| (p.as_path(), &self.sources[p]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Host-appropriate separator: `;` on Windows, `:` elsewhere.
    pub fn separator() -> char {
        if cfg!(windows) {
            ';'
        } else {
            ':'
        }
    }

    pub fn to_classpath_string(&self) -> String {
        self.order
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(&Self::separator().to_string())
    }
}

/// Arguments accepted at classpath-assembly time.
#[derive(Debug, Clone, Default)]
pub struct ClasspathArgs {
    pub extra_paths: Vec<String>,
    pub classpath_overrides: BTreeMap<Lib, PathBuf>,
}

/// Assemble the final classpath map: project paths, then extra paths,
/// applying classpath overrides first so overridden libs never contribute
/// their original paths.
pub fn assemble_classpath(
    project_paths: &[String],
    lib_map: &LibMap,
    aliases: &ComposedAliases,
    args: &ClasspathArgs,
) -> ClasspathMap {
    let mut overrides = aliases.classpath_overrides.clone();
    overrides.extend(args.classpath_overrides.clone());

    let mut map = ClasspathMap::new();

    for raw in project_paths.iter().chain(aliases.paths.iter()) {
        map.insert(PathBuf::from(raw), ClasspathSource::AliasKey("paths".into()));
    }

    for (lib, entry) in lib_map.iter() {
        if let Some(path) = overrides.get(lib) {
            map.insert(path.clone(), ClasspathSource::Lib(lib.clone()));
            continue;
        }
        for path in &entry.coord.paths {
            map.insert(path.clone(), ClasspathSource::Lib(lib.clone()));
        }
    }

    for raw in args.extra_paths.iter().chain(aliases.extra_paths.iter()) {
        map.insert(
            PathBuf::from(raw),
            ClasspathSource::AliasKey("extra-paths".into()),
        );
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{Coord, ProcurerCoord};
    use crate::lib_map::LibEntry;

    fn lib(s: &str) -> Lib {
        Lib::new(s).unwrap()
    }

    fn coord_with_paths(paths: &[&str]) -> Coord {
        let mut coord = Coord::new(ProcurerCoord::Maven {
            version: Some("1".into()),
            repos: vec![],
        });
        coord.paths = paths.iter().map(PathBuf::from).collect();
        coord
    }

    #[test]
    fn project_paths_precede_lib_and_extra_paths() {
        let mut lib_map = LibMap::default();
        lib_map.insert_for_test(
            lib("g/a"),
            LibEntry {
                coord: coord_with_paths(&["/cache/a.jar"]),
                dependents: vec![],
            },
        );
        let aliases = ComposedAliases {
            extra_paths: vec!["target/test-classes".into()],
            ..Default::default()
        };
        let args = ClasspathArgs::default();
        let cp = assemble_classpath(&["src".to_string()], &lib_map, &aliases, &args);
        let entries: Vec<_> = cp.entries().map(|(p, _)| p.to_string_lossy().into_owned()).collect();
        assert_eq!(
            entries,
            vec![
                "src".to_string(),
                "/cache/a.jar".to_string(),
                "target/test-classes".to_string(),
            ]
        );
    }

    #[test]
    fn classpath_override_replaces_lib_paths() {
        let mut lib_map = LibMap::default();
        lib_map.insert_for_test(
            lib("g/a"),
            LibEntry {
                coord: coord_with_paths(&["/cache/a.jar"]),
                dependents: vec![],
            },
        );
        let mut args = ClasspathArgs::default();
        args.classpath_overrides
            .insert(lib("g/a"), PathBuf::from("/local/build/classes"));
        let cp = assemble_classpath(&[], &lib_map, &ComposedAliases::default(), &args);
        let entries: Vec<_> = cp.entries().map(|(p, _)| p.to_string_lossy().into_owned()).collect();
        assert_eq!(entries, vec!["/local/build/classes".to_string()]);
    }

    #[test]
    fn no_path_repeats_first_contributor_wins() {
        let mut map = ClasspathMap::new();
        map.insert(PathBuf::from("/a"), ClasspathSource::AliasKey("paths".into()));
        map.insert(PathBuf::from("/a"), ClasspathSource::Lib(lib("g/a")));
        assert_eq!(map.len(), 1);
    }
}
