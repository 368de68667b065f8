//! Operation: show how each application's modules were resolved.

use std::fmt::Write;

use pomver_core::application::Application;
use pomver_core::config::InventoryConfig;
use pomver_util::errors::{PomverError, PomverResult};

use crate::{discover_and_resolve, ResolvedApplication};

/// Output format for `pomver inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InspectFormat {
    #[default]
    Text,
    Json,
}

/// Options for `pomver inspect`.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    /// Only show the application with this name.
    pub app: Option<String>,
    pub format: InspectFormat,
}

/// Discover and resolve, then render the resolved model.
pub fn inspect(config: &InventoryConfig, opts: &InspectOptions) -> PomverResult<String> {
    let mut resolved = discover_and_resolve(config)?;
    if let Some(name) = &opts.app {
        resolved.retain(|r| &r.application.name == name);
        if resolved.is_empty() {
            return Err(PomverError::Generic {
                message: format!(
                    "No application named '{name}' under {}",
                    config.root_dir.display()
                ),
            }
            .into());
        }
    }

    match opts.format {
        InspectFormat::Text => Ok(render_text(&resolved)),
        InspectFormat::Json => render_json(&resolved),
    }
}

fn render_json(resolved: &[ResolvedApplication]) -> PomverResult<String> {
    let apps: Vec<&Application> = resolved.iter().map(|r| &r.application).collect();
    serde_json::to_string_pretty(&apps).map_err(|e| {
        PomverError::Generic {
            message: format!("Failed to serialize applications: {e}"),
        }
        .into()
    })
}

/// One block per application, one indented block per module.
pub fn render_text(resolved: &[ResolvedApplication]) -> String {
    let mut out = String::new();
    for ResolvedApplication {
        application: app,
        report,
    } in resolved
    {
        let _ = writeln!(out, "{} ({})", app.name, report);
        for id in app.module_ids() {
            let module = app.module(id);
            match &module.identity {
                Some(identity) => {
                    let _ = write!(out, "  {identity}");
                }
                None => {
                    let _ = write!(out, "  {} <unparsed>", module.dir_name);
                }
            }
            if let Some(name) = &module.name {
                let _ = write!(out, " \"{name}\"");
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "    descriptor: {}", module.descriptor_path().display());
            if let Some(parent) = module.parent {
                let _ = writeln!(out, "    parent: {}", app.module(parent));
            }
            if !module.children.is_empty() {
                let children: Vec<String> = module
                    .children
                    .iter()
                    .map(|c| app.module(*c).to_string())
                    .collect();
                let _ = writeln!(out, "    children: {}", children.join(", "));
            }
            for dep in &module.dependencies {
                let _ = writeln!(out, "    {dep}");
            }
        }
    }
    out
}
