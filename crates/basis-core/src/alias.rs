use crate::coord::Coord;
use crate::deps_map::DepsMap;
use crate::library::Lib;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The result of combining one or more aliases with the base deps map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedAliases {
    pub extra_deps: BTreeMap<Lib, Coord>,
    pub override_deps: BTreeMap<Lib, Coord>,
    pub default_deps: BTreeMap<Lib, Coord>,
    pub classpath_overrides: BTreeMap<Lib, PathBuf>,
    pub paths: Vec<String>,
    pub extra_paths: Vec<String>,
    pub jvm_opts: Vec<String>,
    pub main_opts: Option<Vec<String>>,
}

const KNOWN_ALIAS_KEYS: &[&str] = &[
    "extra-deps",
    "override-deps",
    "default-deps",
    "classpath-overrides",
    "paths",
    "extra-paths",
    "jvm-opts",
    "main-opts",
];

/// Apply the per-key alias merge rules to `keys`, in order, against
/// `deps_map.aliases`. Unknown alias keys in a referenced alias's body are
/// fatal; a referenced alias name that doesn't exist is simply skipped (the
/// caller is expected to have validated alias names against the deps map's
/// declared set before calling this).
pub fn combine_aliases(
    deps_map: &DepsMap,
    keys: &[impl AsRef<str>],
) -> Result<ComposedAliases, String> {
    let mut out = ComposedAliases::default();

    for key in keys {
        let Some(alias) = deps_map.aliases.get(key.as_ref()) else {
            continue;
        };
        for field in alias.0.keys() {
            if !KNOWN_ALIAS_KEYS.contains(&field.as_str()) {
                return Err(format!("unknown alias key {field:?}"));
            }
        }

        merge_dep_field(&alias.0, "extra-deps", &mut out.extra_deps)?;
        merge_dep_field(&alias.0, "override-deps", &mut out.override_deps)?;
        merge_dep_field(&alias.0, "default-deps", &mut out.default_deps)?;
        merge_path_override_field(&alias.0, "classpath-overrides", &mut out.classpath_overrides)?;
        merge_ordered_dedup(&alias.0, "paths", &mut out.paths)?;
        merge_ordered_dedup(&alias.0, "extra-paths", &mut out.extra_paths)?;
        merge_ordered_concat(&alias.0, "jvm-opts", &mut out.jvm_opts)?;
        if let Some(v) = alias.0.get("main-opts") {
            out.main_opts = Some(parse_string_list(v)?);
        }
    }

    Ok(out)
}

fn merge_dep_field(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    out: &mut BTreeMap<Lib, Coord>,
) -> Result<(), String> {
    let Some(value) = map.get(key) else {
        return Ok(());
    };
    let entries: BTreeMap<Lib, Coord> =
        serde_json::from_value(value.clone()).map_err(|e| format!("{key}: {e}"))?;
    out.extend(entries);
    Ok(())
}

fn merge_path_override_field(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    out: &mut BTreeMap<Lib, PathBuf>,
) -> Result<(), String> {
    let Some(value) = map.get(key) else {
        return Ok(());
    };
    let entries: BTreeMap<Lib, PathBuf> =
        serde_json::from_value(value.clone()).map_err(|e| format!("{key}: {e}"))?;
    out.extend(entries);
    Ok(())
}

fn merge_ordered_dedup(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    out: &mut Vec<String>,
) -> Result<(), String> {
    let Some(value) = map.get(key) else {
        return Ok(());
    };
    for item in parse_string_list(value)? {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    Ok(())
}

fn merge_ordered_concat(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    out: &mut Vec<String>,
) -> Result<(), String> {
    let Some(value) = map.get(key) else {
        return Ok(());
    };
    out.extend(parse_string_list(value)?);
    Ok(())
}

fn parse_string_list(value: &serde_json::Value) -> Result<Vec<String>, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps_map::RawAlias;

    fn raw(json: serde_json::Value) -> RawAlias {
        RawAlias(json.as_object().unwrap().clone())
    }

    #[test]
    fn unknown_alias_key_is_fatal() {
        let mut deps_map = DepsMap::new();
        deps_map
            .aliases
            .insert("x".into(), raw(serde_json::json!({"bogus-key": true})));
        let err = combine_aliases(&deps_map, &["x"]).unwrap_err();
        assert!(err.contains("bogus-key"));
    }

    #[test]
    fn paths_dedup_preserving_first_occurrence() {
        let mut deps_map = DepsMap::new();
        deps_map.aliases.insert(
            "x".into(),
            raw(serde_json::json!({"paths": ["src", "src", "resources"]})),
        );
        let composed = combine_aliases(&deps_map, &["x"]).unwrap();
        assert_eq!(composed.paths, vec!["src".to_string(), "resources".to_string()]);
    }

    #[test]
    fn jvm_opts_concat_without_dedup() {
        let mut deps_map = DepsMap::new();
        deps_map.aliases.insert(
            "x".into(),
            raw(serde_json::json!({"jvm-opts": ["-Xmx1g", "-Xmx1g"]})),
        );
        let composed = combine_aliases(&deps_map, &["x"]).unwrap();
        assert_eq!(composed.jvm_opts, vec!["-Xmx1g".to_string(), "-Xmx1g".to_string()]);
    }

    #[test]
    fn main_opts_last_alias_wins() {
        let mut deps_map = DepsMap::new();
        deps_map
            .aliases
            .insert("a".into(), raw(serde_json::json!({"main-opts": ["--a"]})));
        deps_map
            .aliases
            .insert("b".into(), raw(serde_json::json!({"main-opts": ["--b"]})));
        let composed = combine_aliases(&deps_map, &["a", "b"]).unwrap();
        assert_eq!(composed.main_opts, Some(vec!["--b".to_string()]));
    }

    #[test]
    fn extra_deps_map_merges_across_aliases() {
        let mut deps_map = DepsMap::new();
        deps_map.aliases.insert(
            "a".into(),
            raw(serde_json::json!({"extra-deps": {"g/a": {"procurer": "maven", "version": "1"}}})),
        );
        deps_map.aliases.insert(
            "b".into(),
            raw(serde_json::json!({"extra-deps": {"g/b": {"procurer": "maven", "version": "2"}}})),
        );
        let composed = combine_aliases(&deps_map, &["a", "b"]).unwrap();
        assert_eq!(composed.extra_deps.len(), 2);
    }
}
