use crate::coord::Coord;
use crate::library::Lib;
use std::collections::BTreeMap;

/// An alias body, still in its raw, unvalidated form: every key the caller
/// supplied, before `combine_aliases` checks it against the known key set
/// and applies each key's merge rule.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawAlias(pub serde_json::Map<String, serde_json::Value>);

/// A merged deps map: the effective configuration the resolver consumes.
///
/// `extra` holds procurer-scoped keys (e.g. `mvn/repos`) that are opaque to
/// the core and passed through to extensions untouched.
#[derive(Debug, Clone, Default)]
pub struct DepsMap {
    pub deps: BTreeMap<Lib, Coord>,
    pub paths: Vec<String>,
    pub aliases: BTreeMap<String, RawAlias>,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DepsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Procurer-scoped config value, e.g. `extra_config("mvn/repos")`.
    pub fn extra_config(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Merge a sequence of deps maps left-to-right. At each top-level key, later
/// maps win unless both sides are maps, in which case they merge key-by-key
/// (recursively, for `extra`); `paths` concatenate and de-dup preserving
/// first occurrence; `deps`/`aliases` map-merge (later entries win).
pub fn merge_edns(edns: &[DepsMap]) -> DepsMap {
    let mut out = DepsMap::new();
    for edn in edns {
        for (lib, coord) in &edn.deps {
            out.deps.insert(lib.clone(), coord.clone());
        }
        for path in &edn.paths {
            if !out.paths.contains(path) {
                out.paths.push(path.clone());
            }
        }
        for (key, alias) in &edn.aliases {
            out.aliases.insert(key.clone(), alias.clone());
        }
        merge_json_maps(&mut out.extra, &edn.extra);
    }
    out
}

fn merge_json_maps(
    dst: &mut serde_json::Map<String, serde_json::Value>,
    src: &serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in src {
        match (dst.get_mut(key), value) {
            (Some(serde_json::Value::Object(existing)), serde_json::Value::Object(incoming)) => {
                merge_json_maps(existing, incoming);
            }
            _ => {
                dst.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::ProcurerCoord;

    fn lib(s: &str) -> Lib {
        Lib::new(s).unwrap()
    }

    fn maven(version: &str) -> Coord {
        Coord::new(ProcurerCoord::Maven {
            version: Some(version.to_string()),
            repos: vec![],
        })
    }

    #[test]
    fn later_deps_win_on_key_collision() {
        let mut a = DepsMap::new();
        a.deps.insert(lib("g/a"), maven("1"));
        let mut b = DepsMap::new();
        b.deps.insert(lib("g/a"), maven("2"));

        let merged = merge_edns(&[a, b]);
        assert_eq!(merged.deps[&lib("g/a")], maven("2"));
    }

    #[test]
    fn paths_concat_and_dedup() {
        let mut a = DepsMap::new();
        a.paths.push("src".into());
        let mut b = DepsMap::new();
        b.paths.push("src".into());
        b.paths.push("resources".into());

        let merged = merge_edns(&[a, b]);
        assert_eq!(merged.paths, vec!["src".to_string(), "resources".to_string()]);
    }

    #[test]
    fn extra_config_merges_nested_objects() {
        let mut a = DepsMap::new();
        a.extra.insert(
            "mvn/repos".to_string(),
            serde_json::json!({"central": "https://repo1.maven.org"}),
        );
        let mut b = DepsMap::new();
        b.extra.insert(
            "mvn/repos".to_string(),
            serde_json::json!({"clojars": "https://repo.clojars.org"}),
        );

        let merged = merge_edns(&[a, b]);
        let repos = merged.extra_config("mvn/repos").unwrap();
        assert_eq!(repos["central"], "https://repo1.maven.org");
        assert_eq!(repos["clojars"], "https://repo.clojars.org");
    }
}
