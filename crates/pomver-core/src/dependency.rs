use std::fmt;

use serde::Serialize;

/// Maven coordinates of a declared dependency, or of a module itself.
///
/// `group_id` and `artifact_id` are fixed at construction; only the version
/// changes while the resolver works out what it should be. An empty version
/// means "not known yet".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// `true` while no version has been assigned.
    pub fn is_pending(&self) -> bool {
        self.version.is_empty()
    }

    /// `true` if the version is the unresolved marker.
    pub fn is_unresolved(&self) -> bool {
        self.version == crate::UNRESOLVED_VERSION
    }

    /// Version-independent `(group, artifact)` key.
    pub fn key(&self) -> LibraryKey {
        LibraryKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Identifies a library regardless of version. All maps keyed by library use
/// this rather than [`Dependency`], whose version is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LibraryKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl fmt::Display for LibraryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}
