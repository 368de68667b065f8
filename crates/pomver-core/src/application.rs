use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::module::{Module, ModuleId};

/// A named set of modules discovered under one top-level directory.
///
/// The application owns every module; parent and child links between modules
/// are [`ModuleId`]s into this arena.
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub name: String,
    pub path: PathBuf,
    modules: Vec<Module>,
}

impl Application {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            modules: Vec::new(),
        }
    }

    /// Register a module and return its id.
    pub fn add_module(&mut self, module: Module) -> ModuleId {
        self.modules.push(module);
        ModuleId(self.modules.len() - 1)
    }

    /// # Panics
    /// Panics if `id` was not issued by this application.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }

    /// # Panics
    /// Panics if `id` was not issued by this application.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.0]
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> {
        (0..self.modules.len()).map(ModuleId)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// First module whose descriptor lives at `path`.
    pub fn find_module_by_path(&self, path: &Path) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.descriptor_path == path)
            .map(ModuleId)
    }

    /// First module whose resolved identity has the given artifact id.
    /// Modules without an identity are skipped.
    pub fn find_module_by_artifact(&self, artifact_id: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| {
                m.identity
                    .as_ref()
                    .is_some_and(|id| id.artifact_id() == artifact_id)
            })
            .map(ModuleId)
    }

    /// Like [`Application::find_module_by_artifact`], but never returns
    /// `child` itself. A module may share its artifact id with its parent.
    pub fn find_parent_by_artifact(&self, child: ModuleId, artifact_id: &str) -> Option<ModuleId> {
        self.module_ids().find(|&id| {
            id != child
                && self.modules[id.0]
                    .identity
                    .as_ref()
                    .is_some_and(|d| d.artifact_id() == artifact_id)
        })
    }

    /// Link `child` under `parent`. Self-links are refused.
    pub fn link_parent(&mut self, child: ModuleId, parent: ModuleId) -> bool {
        if child == parent {
            return false;
        }
        self.modules[child.0].parent = Some(parent);
        let children = &mut self.modules[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
        true
    }

    /// Walk from `start` up the parent chain, starting with `start` itself.
    /// The walk takes at most as many steps as there are modules, so a cyclic
    /// chain terminates.
    pub fn ancestors(&self, start: ModuleId) -> Ancestors<'_> {
        Ancestors {
            app: self,
            next: Some(start),
            remaining: self.modules.len(),
        }
    }

    /// Look up a property locally, then through the parent chain.
    pub fn find_property(&self, start: ModuleId, name: &str) -> Option<&str> {
        self.ancestors(start)
            .find_map(|(_, m)| m.properties.get(name).map(String::as_str))
    }

    /// Look up the recorded version of a group locally, then through the
    /// parent chain. The first recorded entry wins, even if it is empty.
    pub fn find_group_version(&self, start: ModuleId, group_id: &str) -> Option<&str> {
        self.ancestors(start)
            .find_map(|(_, m)| m.group_to_version.get(group_id).map(String::as_str))
    }
}

/// Iterator over a module and its ancestors. See [`Application::ancestors`].
pub struct Ancestors<'a> {
    app: &'a Application,
    next: Option<ModuleId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (ModuleId, &'a Module);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.remaining -= 1;
        let module = self.app.module(id);
        self.next = module.parent;
        Some((id, module))
    }
}
