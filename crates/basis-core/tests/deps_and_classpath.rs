use std::path::PathBuf;

use basis_core::alias::combine_aliases;
use basis_core::classpath_map::{assemble_classpath, ClasspathArgs, ClasspathSource};
use basis_core::deps_map::{merge_edns, RawAlias};
use basis_core::{Coord, CoordId, DepsMap, Lib, LibEntry, LibMap, ProcurerCoord};

fn lib(s: &str) -> Lib {
    Lib::new(s).unwrap()
}

fn maven(version: &str) -> Coord {
    let mut coord = Coord::new(ProcurerCoord::Maven {
        version: Some(version.to_string()),
        repos: vec![],
    });
    coord.paths.push(PathBuf::from(format!("/cache/{version}.jar")));
    coord
}

#[test]
fn test_project_alias_and_lib_paths_compose_into_one_classpath() {
    let mut project = DepsMap::new();
    project.deps.insert(lib("g/a"), maven("1.0"));
    project.paths.push("src/main".to_string());
    project.aliases.insert(
        "test".to_string(),
        RawAlias(
            serde_json::json!({
                "extra-paths": ["target/test-classes"],
                "classpath-overrides": {"g/a": "/local/a-dev.jar"},
            })
            .as_object()
            .unwrap()
            .clone(),
        ),
    );

    let mut override_file = DepsMap::new();
    override_file.deps.insert(lib("g/a"), maven("2.0"));

    let merged = merge_edns(&[project, override_file]);
    assert_eq!(merged.deps[&lib("g/a")], maven("2.0"));
    assert_eq!(merged.paths, vec!["src/main".to_string()]);

    let composed = combine_aliases(&merged, &["test"]).unwrap();
    assert_eq!(composed.extra_paths, vec!["target/test-classes".to_string()]);
    assert_eq!(
        composed.classpath_overrides.get(&lib("g/a")),
        Some(&PathBuf::from("/local/a-dev.jar"))
    );

    let mut lib_map = LibMap::default();
    lib_map.insert_for_test(
        lib("g/a"),
        LibEntry {
            coord: maven("2.0"),
            dependents: vec![],
        },
    );

    let classpath = assemble_classpath(&merged.paths, &lib_map, &composed, &ClasspathArgs::default());

    let entries: Vec<_> = classpath.entries().collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].0, PathBuf::from("src/main"));
    assert_eq!(entries[1].0, PathBuf::from("/local/a-dev.jar"));
    assert!(matches!(entries[1].1, ClasspathSource::Lib(l) if *l == lib("g/a")));
    assert_eq!(entries[2].0, PathBuf::from("target/test-classes"));

    let rendered = classpath.to_classpath_string();
    assert_eq!(rendered.split(basis_core::classpath_map::ClasspathMap::separator()).count(), 3);
}

#[test]
fn test_unknown_alias_key_is_rejected_before_composition_runs() {
    let mut deps_map = DepsMap::new();
    deps_map.aliases.insert(
        "broken".to_string(),
        RawAlias(
            serde_json::json!({"bogus-key": true})
                .as_object()
                .unwrap()
                .clone(),
        ),
    );

    let err = combine_aliases(&deps_map, &["broken"]).unwrap_err();
    assert!(err.contains("bogus-key"));
}

#[test]
fn test_coord_id_round_trips_through_serde_comparison() {
    let id = CoordId::new("1.2.3");
    assert_eq!(id.as_str(), "1.2.3");
}
