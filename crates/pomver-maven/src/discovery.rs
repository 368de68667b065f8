//! Descriptor discovery: every directory directly under the root is an
//! application, and every descriptor file beneath it is one of its modules.

use std::cmp::Ordering;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use pomver_core::application::Application;
use pomver_core::config::InventoryConfig;
use pomver_core::module::Module;
use pomver_util::errors::{PomverError, PomverResult};

/// What to look for while walking application directories.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// File name of a descriptor, e.g. `pom.xml`.
    pub descriptor_name: String,
    /// Glob patterns, relative to the application directory, of directories
    /// that are never descended into.
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::from_config(&InventoryConfig::default())
    }
}

impl DiscoveryOptions {
    pub fn from_config(config: &InventoryConfig) -> Self {
        Self {
            descriptor_name: config.descriptor_name.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }
}

/// Find all applications under `root`, sorted by name.
///
/// Applications without a single descriptor are dropped. Within an
/// application, files are visited before subdirectories, so an aggregator
/// descriptor is registered before the modules beneath it.
pub fn discover_applications(
    root: &Path,
    opts: &DiscoveryOptions,
) -> PomverResult<Vec<Application>> {
    if !root.is_dir() {
        return Err(PomverError::Discovery {
            message: format!("{} is not a directory.", root.display()),
        }
        .into());
    }
    let root = std::fs::canonicalize(root).map_err(PomverError::Io)?;
    let excludes = build_exclude_set(&opts.exclude_dirs)?;

    let mut app_dirs = Vec::new();
    for entry in std::fs::read_dir(&root).map_err(PomverError::Io)? {
        let entry = entry.map_err(PomverError::Io)?;
        if entry.path().is_dir() {
            app_dirs.push(entry.path());
        }
    }
    app_dirs.sort();

    let mut apps = Vec::new();
    for app_path in app_dirs {
        tracing::info!(path = %app_path.display(), "looking into application directory");
        let app = discover_application(&app_path, &opts.descriptor_name, &excludes);
        if app.is_empty() {
            tracing::debug!(application = %app.name, "no descriptors, skipping");
        } else {
            apps.push(app);
        }
    }
    Ok(apps)
}

/// Collect every descriptor under one application directory.
pub fn discover_application(
    app_path: &Path,
    descriptor_name: &str,
    excludes: &GlobSet,
) -> Application {
    let app_name = app_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut app = Application::new(app_name, app_path);

    let walker = WalkDir::new(app_path)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| !is_excluded(e, app_path, excludes));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(application = %app.name, "skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != descriptor_name {
            continue;
        }
        let path = entry.into_path();
        let dir_name = pomver_util::fs::parent_dir_name(&path);
        tracing::info!(module = %dir_name, application = %app.name, "found module");
        app.add_module(Module::new(dir_name, path));
    }
    app
}

/// Compile exclusion patterns into a single matcher.
pub fn build_exclude_set(patterns: &[String]) -> PomverResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| PomverError::Config {
            message: format!("Invalid exclude pattern '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        PomverError::Config {
            message: format!("Failed to build exclude patterns: {e}"),
        }
        .into()
    })
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_excluded(entry: &DirEntry, app_path: &Path, excludes: &GlobSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .path()
        .strip_prefix(app_path)
        .map(|rel| excludes.is_match(rel))
        .unwrap_or(false)
}
