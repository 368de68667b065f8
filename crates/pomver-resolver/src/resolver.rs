//! Two-pass resolution of one application's descriptors.
//!
//! Pass 1 runs per module, in registration order, and fills in properties,
//! the parent link, the module's identity and its dependency list, in that
//! order, resolving versions as far as already-known state allows. Once every
//! module has been through pass 1, parents that were declared by coordinates
//! before they were registered are linked, and pass 2 settles every
//! dependency still lacking a version.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use pomver_core::application::Application;
use pomver_core::dependency::Dependency;
use pomver_core::module::ModuleId;
use pomver_core::UNRESOLVED_VERSION;
use pomver_maven::pom::{PomDependency, PomDocument};
use pomver_util::fs::normalize_path;

use crate::similarity;
use crate::version::define_version;

/// Property that is also reported as a `Java` pseudo-dependency.
pub const JAVA_VERSION_PROPERTY: &str = "java.version";

/// Artifact id of the pseudo-dependency carrying the language level.
pub const JAVA_ARTIFACT: &str = "Java";

/// Counts gathered while resolving one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub modules: usize,
    /// Modules whose descriptor could not be read or parsed.
    pub unparsed: usize,
    pub dependencies: usize,
    /// Dependencies whose version was borrowed from a similar group.
    pub borrowed: usize,
    /// Dependencies left with the unresolved marker.
    pub unresolved: usize,
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} modules, {} dependencies ({} borrowed, {} unresolved)",
            self.modules, self.dependencies, self.borrowed, self.unresolved
        )?;
        if self.unparsed > 0 {
            write!(f, ", {} unparsed descriptors", self.unparsed)?;
        }
        Ok(())
    }
}

/// Read every module's descriptor from disk and resolve the application.
///
/// Descriptors that cannot be read or parsed are reported and skipped; the
/// module stays in the application without an identity.
pub fn resolve_application(app: &mut Application) -> ResolutionReport {
    tracing::info!(application = %app.name, "parsing application");
    let documents: Vec<Option<PomDocument>> = app
        .modules()
        .iter()
        .map(|m| match PomDocument::from_path(&m.descriptor_path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(module = %m, "skipping descriptor: {e}");
                None
            }
        })
        .collect();
    let report = resolve_documents(app, documents);
    tracing::info!(application = %app.name, "finished parsing application");
    report
}

/// Resolve an application from already-parsed descriptors.
///
/// `documents[i]` belongs to the i-th registered module; `None` marks a
/// descriptor that could not be parsed, as does a missing trailing entry. Any previously resolved state of the
/// modules is discarded first, so resolving the same input twice gives the
/// same result.
pub fn resolve_documents(
    app: &mut Application,
    documents: Vec<Option<PomDocument>>,
) -> ResolutionReport {
    let ids: Vec<ModuleId> = app.module_ids().collect();
    for &id in &ids {
        app.module_mut(id).clear_resolved();
    }

    let mut resolver = DescriptorResolver::new(app);
    let mut documents = documents.into_iter();
    for &id in &ids {
        match documents.next().flatten() {
            Some(doc) => resolver.parse_module(id, &doc),
            None => resolver.report.unparsed += 1,
        }
    }
    resolver.link_pending_parents();
    for &id in &ids {
        resolver.resolve_unresolved(id);
    }

    let mut report = resolver.report;
    report.modules = ids.len();
    report.dependencies = app.modules().iter().map(|m| m.dependencies.len()).sum();
    report.unresolved = app
        .modules()
        .iter()
        .flat_map(|m| &m.dependencies)
        .filter(|d| d.is_unresolved())
        .count();
    report
}

/// Drives resolution of one application's module set.
struct DescriptorResolver<'a> {
    app: &'a mut Application,
    /// Parents declared by coordinates that were not registered yet when the
    /// child went through pass 1.
    pending_parents: BTreeMap<ModuleId, PomDependency>,
    report: ResolutionReport,
}

impl<'a> DescriptorResolver<'a> {
    fn new(app: &'a mut Application) -> Self {
        Self {
            app,
            pending_parents: BTreeMap::new(),
            report: ResolutionReport::default(),
        }
    }

    /// Pass 1 for a single module.
    fn parse_module(&mut self, id: ModuleId, doc: &PomDocument) {
        self.enrich_properties(id, doc);
        self.enrich_parent(id, doc);
        self.enrich_identity(id, doc);
        self.enrich_dependencies(id, doc);
    }

    fn enrich_properties(&mut self, id: ModuleId, doc: &PomDocument) {
        let module = self.app.module_mut(id);
        for (name, value) in doc.properties() {
            if name == JAVA_VERSION_PROPERTY {
                module
                    .dependencies
                    .push(Dependency::new("", JAVA_ARTIFACT, value.clone()));
            }
            module.properties.insert(name, value);
        }
    }

    fn enrich_parent(&mut self, id: ModuleId, doc: &PomDocument) {
        let Some(parent) = doc.parent() else {
            return;
        };

        if let Some(relative) = &parent.relative_path {
            let target = parent_descriptor_path(self.app.module(id).descriptor_path(), relative);
            let linked = match self.app.find_module_by_path(&target) {
                Some(parent_id) => self.app.link_parent(id, parent_id),
                None => false,
            };
            if !linked {
                tracing::warn!(
                    module = %self.app.module(id),
                    path = %target.display(),
                    "can't find parent for module"
                );
            }
            return;
        }

        let coords = parent.coordinates();
        let mut dep = Dependency::new(&coords.group_id, &coords.artifact_id, &coords.version);
        define_version(self.app, id, &mut dep);
        self.app.module_mut(id).dependencies.push(dep);

        let linked = match self.app.find_parent_by_artifact(id, &coords.artifact_id) {
            Some(parent_id) => self.app.link_parent(id, parent_id),
            None => false,
        };
        if !linked {
            tracing::debug!(
                module = %self.app.module(id),
                artifact = %coords.artifact_id,
                "parent not registered yet"
            );
            self.pending_parents.insert(id, coords);
        }
    }

    fn enrich_identity(&mut self, id: ModuleId, doc: &PomDocument) {
        let mut coords = doc.coordinates();
        if let Some(parent) = doc.parent() {
            if coords.group_id.is_empty() {
                coords.group_id = parent.group_id;
            }
            if coords.version.is_empty() {
                coords.version = parent.version;
            }
        }
        let mut identity = Dependency::new(coords.group_id, coords.artifact_id, coords.version);
        define_version(self.app, id, &mut identity);

        let module = self.app.module_mut(id);
        module.identity = Some(identity);
        module.name = doc.name();
    }

    fn enrich_dependencies(&mut self, id: ModuleId, doc: &PomDocument) {
        for raw in doc.dependencies() {
            let mut dep = Dependency::new(raw.group_id, raw.artifact_id, raw.version);
            define_version(self.app, id, &mut dep);
            self.app.module_mut(id).dependencies.push(dep);
        }
        self.app.module_mut(id).sort_dependencies();
    }

    /// Link parents declared by coordinates that only became known after the
    /// child was parsed.
    fn link_pending_parents(&mut self) {
        for (id, coords) in std::mem::take(&mut self.pending_parents) {
            let linked = match self.app.find_parent_by_artifact(id, &coords.artifact_id) {
                Some(parent_id) => self.app.link_parent(id, parent_id),
                None => false,
            };
            if !linked {
                tracing::warn!(
                    module = %self.app.module(id),
                    group = %coords.group_id,
                    artifact = %coords.artifact_id,
                    "can't find parent for module"
                );
            }
        }
    }

    /// Pass 2 for a single module.
    fn resolve_unresolved(&mut self, id: ModuleId) {
        for index in 0..self.app.module(id).dependencies.len() {
            let dep = self.app.module(id).dependencies[index].clone();
            if !dep.is_pending() {
                continue;
            }
            let version = self.settle_version(id, &dep);
            self.app.module_mut(id).dependencies[index].set_version(version);
        }
    }

    fn settle_version(&mut self, id: ModuleId, dep: &Dependency) -> String {
        let module = self.app.module(id);
        match self.app.find_group_version(id, dep.group_id()) {
            Some(version) if !version.is_empty() => return version.to_string(),
            Some(_) => {
                tracing::warn!(
                    module = %module,
                    dependency = %dep.key(),
                    "unable to define version: group only has an unresolved property"
                );
                return UNRESOLVED_VERSION.to_string();
            }
            None => {}
        }

        match similarity::borrow_version(self.app, id, dep.group_id()) {
            Some(similar) => {
                tracing::info!(
                    module = %module,
                    dependency = %dep.key(),
                    similar_group = %similar.group_id,
                    "set similar group version {}",
                    similar.version
                );
                self.report.borrowed += 1;
                similar.version
            }
            None => {
                tracing::warn!(
                    module = %module,
                    dependency = %dep.key(),
                    "unable to define version"
                );
                UNRESOLVED_VERSION.to_string()
            }
        }
    }
}

/// Path of the parent descriptor named by `relative`, resolved against the
/// directory of `descriptor`. A directory reference means the descriptor
/// file of the same name inside it.
pub fn parent_descriptor_path(descriptor: &Path, relative: &str) -> PathBuf {
    let base = descriptor.parent().unwrap_or_else(|| Path::new(""));
    let mut target = normalize_path(&base.join(relative));
    let names_file = target
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if !names_file {
        if let Some(file_name) = descriptor.file_name() {
            target.push(file_name);
        }
    }
    target
}
