//! POM vocabulary: coordinates, properties, parent reference and dependency
//! declarations read from a parsed descriptor tree.
//!
//! Values are returned raw. Placeholders are not interpolated and missing
//! fields become empty strings; deciding what they mean is the resolver's job.

use std::path::Path;

use pomver_util::errors::{PomverError, PomverResult};

use crate::xml::{self, Element, QName};

/// Namespace every POM 4.0.0 element lives in.
pub const MAVEN_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Reference to a parent POM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Path to the parent descriptor relative to this one, when declared and
    /// non-empty.
    pub relative_path: Option<String>,
}

impl ParentRef {
    pub fn coordinates(&self) -> PomDependency {
        PomDependency {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
        }
    }
}

/// A `groupId`/`artifactId`/`version` triple as written in the POM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A parsed POM (Project Object Model) document.
#[derive(Debug, Clone)]
pub struct PomDocument {
    root: Element,
    namespace: Option<&'static str>,
}

impl PomDocument {
    /// Wrap a parsed tree. Documents without a root namespace are matched
    /// with unqualified tag names; all others with [`MAVEN_NAMESPACE`].
    pub fn from_element(root: Element) -> Self {
        let namespace = root.namespace().map(|_| MAVEN_NAMESPACE);
        Self { root, namespace }
    }

    /// Parse a POM XML string.
    pub fn parse(content: &str) -> PomverResult<Self> {
        xml::parse_document(content).map(Self::from_element)
    }

    /// Read and parse a POM file.
    pub fn from_path(path: &Path) -> PomverResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PomverError::Descriptor {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    fn q<'a>(&self, local: &'a str) -> QName<'a> {
        QName::new(self.namespace, local)
    }

    /// Declared properties in document order, from the first `<properties>`
    /// element found. Names are the local tag names; values are trimmed.
    pub fn properties(&self) -> Vec<(String, String)> {
        let Some(properties) = self.root.find(&[self.q("properties")]) else {
            return Vec::new();
        };
        properties
            .elements()
            .iter()
            .map(|p| {
                (
                    p.local_name().to_string(),
                    p.text().unwrap_or_default().trim().to_string(),
                )
            })
            .collect()
    }

    /// The first `<parent>` element, if any.
    pub fn parent(&self) -> Option<ParentRef> {
        let parent = self.root.find(&[self.q("parent")])?;
        let coords = self.coordinates_of(parent);
        let relative_path = parent
            .child_text(self.q("relativePath"))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Some(ParentRef {
            group_id: coords.group_id,
            artifact_id: coords.artifact_id,
            version: coords.version,
            relative_path,
        })
    }

    /// The project's own coordinates, as declared directly under the root.
    pub fn coordinates(&self) -> PomDependency {
        self.coordinates_of(&self.root)
    }

    /// The project's display name.
    pub fn name(&self) -> Option<String> {
        self.root.child_text(self.q("name")).map(str::to_string)
    }

    /// Every `<dependency>` under any `<dependencies>` element, including
    /// dependency management and plugin dependencies, in document order.
    pub fn dependencies(&self) -> Vec<PomDependency> {
        self.root
            .find_all(&[self.q("dependencies"), self.q("dependency")])
            .into_iter()
            .map(|d| self.coordinates_of(d))
            .collect()
    }

    fn coordinates_of(&self, element: &Element) -> PomDependency {
        let text = |local: &str| {
            element
                .child_text(self.q(local))
                .unwrap_or_default()
                .to_string()
        };
        PomDependency {
            group_id: text("groupId"),
            artifact_id: text("artifactId"),
            version: text("version"),
        }
    }
}
