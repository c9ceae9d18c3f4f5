//! The reference `Extension` implementation: Maven-layout coordinates
//! resolved against a project-local cache and one or more HTTP repositories.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use basis_core::{BoxFuture, Coord, CoordId, DepsMap, Extension, ExtensionResult, Lib, ManifestInfo, ProcurerCoord};
use basis_util::errors::BasisError;

use crate::cache::LocalCache;
use crate::metadata::parse_snapshot_metadata;
use crate::pom::{self, Pom};
use crate::repository::{MavenRepository, RepositoryEntry};
use crate::version::compare_version_strings;
use crate::{checksum, download};

/// Procurer-scoped config key carrying named repository definitions.
///
/// Expected shape: `{"mvn/repos": {"central": "https://...", "nexus": {"url": "...", "username": "..."}}}`.
pub const REPOS_CONFIG_KEY: &str = "mvn/repos";

/// Procurer-scoped config key carrying a fallback version for bare coords.
pub const DEFAULT_VERSION_CONFIG_KEY: &str = "mvn/default-version";

const MAX_PARENT_DEPTH: u64 = 16;

/// Resolves Maven coordinates: POM fetch and parent/BOM merging for
/// `coord_deps`, JAR download and checksum verification for `coord_paths`.
pub struct MavenExtension {
    cache: LocalCache,
    client: reqwest::Client,
}

impl MavenExtension {
    pub fn new(project_root: &Path, client: reqwest::Client) -> Self {
        Self {
            cache: LocalCache::new(project_root),
            client,
        }
    }

    fn repos_for(&self, config: &DepsMap, coord: &Coord) -> Vec<MavenRepository> {
        let named = match &coord.procurer {
            ProcurerCoord::Maven { repos, .. } => repos.as_slice(),
            _ => &[],
        };

        let configured: BTreeMap<String, RepositoryEntry> = config
            .extra_config(REPOS_CONFIG_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        let mut repos: Vec<MavenRepository> = if named.is_empty() {
            configured
                .iter()
                .map(|(name, entry)| MavenRepository::from_entry(name, entry))
                .collect()
        } else {
            named
                .iter()
                .filter_map(|name| {
                    configured
                        .get(name)
                        .map(|entry| MavenRepository::from_entry(name, entry))
                })
                .collect()
        };

        if repos.is_empty() {
            repos.push(MavenRepository::maven_central());
        }
        repos
    }

    fn version_of<'a>(&self, coord: &'a Coord) -> Option<&'a str> {
        match &coord.procurer {
            ProcurerCoord::Maven { version, .. } => version.as_deref(),
            _ => None,
        }
    }

    async fn fetch_pom_from_any(
        &self,
        repos: &[MavenRepository],
        group: &str,
        artifact: &str,
        version: &str,
    ) -> ExtensionResult<Option<Pom>> {
        for repo in repos {
            match self
                .cache
                .fetch_pom(&self.client, repo, group, artifact, version)
                .await
            {
                Ok(Some(pom)) => return Ok(Some(pom)),
                Ok(None) => continue,
                Err(e) => return Err(to_extension_error(e)),
            }
        }
        Ok(None)
    }

    async fn resolve_parent_chain(&self, repos: &[MavenRepository], pom: &mut Pom) -> ExtensionResult<()> {
        let mut depth = 0;
        while let Some(parent) = pom.parent.clone() {
            depth += 1;
            if depth > MAX_PARENT_DEPTH {
                return Err(BasisError::Cycle { iterations: depth });
            }
            let Some(parent_pom) = self
                .fetch_pom_from_any(repos, &parent.group_id, &parent.artifact_id, &parent.version)
                .await?
            else {
                break;
            };
            let next_parent = parent_pom.parent.clone();
            pom.apply_parent(&parent_pom);
            pom.parent = next_parent;
        }
        Ok(())
    }

    /// Resolve a `-SNAPSHOT` version to its timestamped filename base by
    /// consulting the version-level `maven-metadata.xml`. Returns `None` for
    /// non-snapshot versions, or when no configured repository publishes
    /// snapshot metadata for this coordinate (local-only snapshots fall back
    /// to the literal `-SNAPSHOT` filename).
    async fn resolve_snapshot_base(
        &self,
        repos: &[MavenRepository],
        group: &str,
        artifact: &str,
        version: &str,
    ) -> ExtensionResult<Option<String>> {
        if !version.ends_with("-SNAPSHOT") {
            return Ok(None);
        }
        for repo in repos {
            let url = repo.snapshot_metadata_url(group, artifact, version);
            match download::download_text(&self.client, repo, &url).await {
                Ok(Some(xml)) => {
                    let meta = parse_snapshot_metadata(&xml).map_err(to_extension_error)?;
                    if let Some(base) = meta.snapshot_base(artifact) {
                        return Ok(Some(base));
                    }
                }
                Ok(None) => continue,
                Err(e) => return Err(to_extension_error(e)),
            }
        }
        Ok(None)
    }

    async fn apply_bom_imports(&self, repos: &[MavenRepository], pom: &mut Pom) -> ExtensionResult<()> {
        let imports: Vec<(String, String, String)> = pom
            .bom_imports()
            .iter()
            .filter_map(|d| {
                d.version
                    .clone()
                    .map(|v| (d.group_id.clone(), d.artifact_id.clone(), v))
            })
            .collect();

        for (group, artifact, version) in imports {
            let Some(mut bom) = self.fetch_pom_from_any(repos, &group, &artifact, &version).await? else {
                continue;
            };
            self.resolve_parent_chain(repos, &mut bom).await?;
            pom.apply_parent(&bom);
        }
        Ok(())
    }
}

impl Extension for MavenExtension {
    fn canonicalize(&self, lib: &Lib, coord: &Coord, config: &DepsMap) -> ExtensionResult<(Lib, Coord)> {
        let ProcurerCoord::Maven { version, repos } = &coord.procurer else {
            return Err(BasisError::Extension {
                message: format!("{lib} does not carry a maven coord"),
            });
        };
        if version.is_some() {
            return Ok((lib.clone(), coord.clone()));
        }

        let default_version = config
            .extra_config(DEFAULT_VERSION_CONFIG_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let Some(resolved) = default_version else {
            return Err(BasisError::Input {
                message: format!(
                    "{lib} has no version and no `{DEFAULT_VERSION_CONFIG_KEY}` default is configured"
                ),
            });
        };

        let mut canon = coord.clone();
        canon.procurer = ProcurerCoord::Maven {
            version: Some(resolved),
            repos: repos.clone(),
        };
        Ok((lib.clone(), canon))
    }

    fn dep_id(&self, lib: &Lib, coord: &Coord, _config: &DepsMap) -> ExtensionResult<CoordId> {
        // `dep_id` is a synchronous, non-fetching hook (see basis_core::Extension),
        // so a `-SNAPSHOT` coordinate's id stays the declared version string rather
        // than the timestamped build it resolves to; coord_paths does that
        // resolution against maven-metadata.xml once the coord is actually fetched.
        let version = self.version_of(coord).ok_or_else(|| BasisError::Invariant {
            message: format!("{lib} reached dep_id uncanonicalized"),
        })?;
        Ok(CoordId::new(version))
    }

    fn manifest_type(&self, lib: &Lib, coord: &Coord, _config: &DepsMap) -> ExtensionResult<ManifestInfo> {
        let version = self.version_of(coord).ok_or_else(|| BasisError::Invariant {
            message: format!("{lib} reached manifest_type uncanonicalized"),
        })?;
        let root = self.cache.artifact_dir(lib.group(), lib.artifact(), version);
        Ok(ManifestInfo {
            manifest: "pom".to_string(),
            root,
        })
    }

    fn coord_deps<'a>(
        &'a self,
        lib: &'a Lib,
        coord: &'a Coord,
        _manifest: &'a ManifestInfo,
        config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<(Lib, Coord)>>> {
        Box::pin(async move {
            let version = self.version_of(coord).ok_or_else(|| BasisError::Invariant {
                message: format!("{lib} reached coord_deps uncanonicalized"),
            })?;
            let repos = self.repos_for(config, coord);

            let Some(mut pom) = self
                .fetch_pom_from_any(&repos, lib.group(), lib.artifact(), version)
                .await?
            else {
                return Err(BasisError::Extension {
                    message: format!("no configured repository has a POM for {lib}:{version}"),
                });
            };

            self.resolve_parent_chain(&repos, &mut pom).await?;
            self.apply_bom_imports(&repos, &mut pom).await?;
            pom.resolve_properties();

            let mut deps = pom::direct_deps(&pom);
            for (_, dep_coord) in deps.iter_mut() {
                dep_coord.exclusions.extend(coord.exclusions.iter().cloned());
            }
            Ok(deps)
        })
    }

    fn coord_paths<'a>(
        &'a self,
        lib: &'a Lib,
        coord: &'a Coord,
        _manifest: &'a ManifestInfo,
        config: &'a DepsMap,
    ) -> BoxFuture<'a, ExtensionResult<Vec<PathBuf>>> {
        Box::pin(async move {
            let version = self.version_of(coord).ok_or_else(|| BasisError::Invariant {
                message: format!("{lib} reached coord_paths uncanonicalized"),
            })?;

            if let Some(path) = self
                .cache
                .get_jar(lib.group(), lib.artifact(), version, lib.classifier())
            {
                return Ok(vec![path]);
            }

            let repos = self.repos_for(config, coord);
            let snapshot_base = self
                .resolve_snapshot_base(&repos, lib.group(), lib.artifact(), version)
                .await?;

            for repo in &repos {
                let url = match &snapshot_base {
                    Some(base) => {
                        let filename = match lib.classifier() {
                            Some(c) => format!("{base}-{c}.jar"),
                            None => format!("{base}.jar"),
                        };
                        repo.file_url(lib.group(), lib.artifact(), version, &filename)
                    }
                    None => repo.jar_url(lib.group(), lib.artifact(), version, lib.classifier()),
                };
                let label = format!("{}:{}:{version}", lib.group(), lib.artifact());
                match download::download_artifact(&self.client, repo, &url, &label).await {
                    Ok(Some(data)) => {
                        checksum::verify(&self.client, repo, &label, &url, &data)
                            .await
                            .map_err(to_extension_error)?;
                        let path = self
                            .cache
                            .put_jar(lib.group(), lib.artifact(), version, lib.classifier(), &data)
                            .map_err(to_extension_error)?;
                        return Ok(vec![path]);
                    }
                    Ok(None) => continue,
                    Err(e) => return Err(to_extension_error(e)),
                }
            }

            Err(BasisError::Extension {
                message: format!("no configured repository has a jar for {lib}:{version}"),
            })
        })
    }

    fn compare_versions(&self, _lib: &Lib, a: &Coord, b: &Coord, _config: &DepsMap) -> Ordering {
        match (self.version_of(a), self.version_of(b)) {
            (Some(va), Some(vb)) => compare_version_strings(va, vb),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }

    fn coord_summary(&self, lib: &Lib, coord: &Coord) -> String {
        match self.version_of(coord) {
            Some(version) => format!("{}:{}:{version}", lib.group(), lib.artifact()),
            None => format!("{}:{}", lib.group(), lib.artifact()),
        }
    }
}

fn to_extension_error(err: miette::Report) -> BasisError {
    BasisError::Extension {
        message: err.to_string(),
    }
}
