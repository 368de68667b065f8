use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dependency::Dependency;

/// Index of a [`Module`] inside its owning [`crate::application::Application`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(pub(crate) usize);


/// One build descriptor and everything resolved from it.
///
/// Fields start empty when the descriptor is discovered and are filled in by
/// the resolver. `parent` and `children` are lookups into the owning
/// application, not ownership.
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    /// Name of the directory holding the descriptor.
    pub dir_name: String,
    pub descriptor_path: PathBuf,
    /// Display name declared by the descriptor, if any.
    pub name: Option<String>,
    /// The module's own coordinates. `None` until parsed, or if parsing failed.
    pub identity: Option<Dependency>,
    pub dependencies: Vec<Dependency>,
    pub properties: BTreeMap<String, String>,
    /// Most recent explicit version seen per group id in this module.
    pub group_to_version: BTreeMap<String, String>,
    pub parent: Option<ModuleId>,
    pub children: Vec<ModuleId>,
}

impl Module {
    pub fn new(dir_name: impl Into<String>, descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            dir_name: dir_name.into(),
            descriptor_path: descriptor_path.into(),
            name: None,
            identity: None,
            dependencies: Vec::new(),
            properties: BTreeMap::new(),
            group_to_version: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Drop everything resolved from the descriptor, keeping only where it
    /// lives. Resolving again after this starts from a clean slate.
    pub fn clear_resolved(&mut self) {
        self.name = None;
        self.identity = None;
        self.dependencies.clear();
        self.properties.clear();
        self.group_to_version.clear();
        self.parent = None;
        self.children.clear();
    }

    /// Sort dependencies by `(group_id, artifact_id)`. The sort is stable, so
    /// duplicates keep their declaration order.
    pub fn sort_dependencies(&mut self) {
        self.dependencies.sort_by(|a, b| {
            (a.group_id(), a.artifact_id()).cmp(&(b.group_id(), b.artifact_id()))
        });
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Some(id) if !id.artifact_id().is_empty() => {
                write!(f, "{} ({})", self.dir_name, id.artifact_id())
            }
            _ => write!(f, "{}", self.dir_name),
        }
    }
}
