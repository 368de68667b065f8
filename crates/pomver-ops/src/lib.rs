pub mod ops_export;
pub mod ops_inspect;

use std::path::{Path, PathBuf};

use pomver_core::application::Application;
use pomver_core::config::InventoryConfig;
use pomver_maven::discovery::{self, DiscoveryOptions};
use pomver_resolver::resolver::{self, ResolutionReport};
use pomver_util::errors::PomverResult;
use pomver_util::status;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_dir: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
    /// Added to the configured ignore list, not replacing it.
    pub ignore_group_ids: Vec<String>,
    pub ignore_applications: Vec<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut InventoryConfig) {
        if let Some(root) = &self.root_dir {
            config.root_dir = root.clone();
        }
        if let Some(export) = &self.export_path {
            config.export_path = export.clone();
        }
        config
            .ignore_group_ids
            .extend(self.ignore_group_ids.iter().cloned());
        config
            .ignore_applications
            .extend(self.ignore_applications.iter().cloned());
    }
}

/// Load `pomver.toml` (or the explicit `config_path`) and apply overrides.
pub fn load_config(
    config_path: Option<&Path>,
    cwd: &Path,
    overrides: &ConfigOverrides,
) -> PomverResult<InventoryConfig> {
    let mut config = InventoryConfig::load_from(config_path, cwd)?;
    overrides.apply(&mut config);
    Ok(config)
}

/// An application after resolution, with what resolving it found.
#[derive(Debug, Clone)]
pub struct ResolvedApplication {
    pub application: Application,
    pub report: ResolutionReport,
}

/// Discover every application under the configured root and resolve each.
pub fn discover_and_resolve(config: &InventoryConfig) -> PomverResult<Vec<ResolvedApplication>> {
    let apps = discovery::discover_applications(
        &config.root_dir,
        &DiscoveryOptions::from_config(config),
    )?;
    status::status_info(
        "Found",
        &format!(
            "{} applications under {}",
            apps.len(),
            config.root_dir.display()
        ),
    );

    let mut resolved = Vec::with_capacity(apps.len());
    for mut application in apps {
        status::status(
            "Resolving",
            &format!("{} ({} modules)", application.name, application.len()),
        );
        let report = resolver::resolve_application(&mut application);
        if report.unresolved > 0 {
            status::status_warn(
                "Unresolved",
                &format!("{} dependencies in {}", report.unresolved, application.name),
            );
        }
        resolved.push(ResolvedApplication {
            application,
            report,
        });
    }
    Ok(resolved)
}
