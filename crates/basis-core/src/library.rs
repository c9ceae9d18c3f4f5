use std::fmt;

/// A qualified library name, `group/artifact`.
///
/// Unqualified names are rejected at the read boundary (symbol
/// canonicalization is an ingestion concern, not the core's); by the time a
/// `Lib` exists it is assumed qualified.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Lib(String);

impl Lib {
    /// Build a `Lib` from an already-qualified `group/artifact` string.
    ///
    /// Returns `None` if `name` has no `/` separator.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.split('/').count() == 2 && !name.starts_with('/') && !name.ends_with('/') {
            Some(Self(name))
        } else {
            None
        }
    }

    pub fn group(&self) -> &str {
        self.0.split('/').next().unwrap()
    }

    pub fn artifact_with_classifier(&self) -> &str {
        self.0.split('/').nth(1).unwrap()
    }

    /// The artifact name with any trailing `$classifier` suffix stripped.
    pub fn artifact(&self) -> &str {
        self.artifact_with_classifier()
            .split('$')
            .next()
            .unwrap()
    }

    /// The classifier suffix, if this lib name carries one (`group/artifact$classifier`).
    pub fn classifier(&self) -> Option<&str> {
        self.artifact_with_classifier().split_once('$').map(|(_, c)| c)
    }

    /// This lib with any classifier suffix removed, so classifier variants
    /// of the same artifact share one exclusion-set entry.
    pub fn without_classifier(&self) -> Lib {
        match self.classifier() {
            Some(_) => Lib(format!("{}/{}", self.group(), self.artifact())),
            None => self.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Lib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Lib {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lib::new(s).ok_or_else(|| format!("lib name must be `group/artifact`, got {s:?}"))
    }
}
