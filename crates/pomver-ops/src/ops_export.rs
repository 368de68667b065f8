//! Operation: resolve every application and export the version inventory.

use std::fmt;
use std::path::PathBuf;

use pomver_core::application::Application;
use pomver_core::config::InventoryConfig;
use pomver_export::writer;
use pomver_export::{ExportOptions, InventoryTable};

use pomver_util::errors::PomverResult;

use crate::discover_and_resolve;

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Application columns written.
    pub applications: usize,
    /// Library rows written.
    pub libraries: usize,
    /// Dependencies left unresolved across all applications.
    pub unresolved: usize,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} libraries across {} applications to {}",
            self.libraries,
            self.applications,
            self.path.display()
        )
    }
}

/// Check the config, resolve everything under its root and write the CSV.
///
/// Only a failed precondition or a failed write aborts; descriptors that
/// cannot be resolved are reported and end up as unresolved cells.
pub fn export(config: &InventoryConfig) -> PomverResult<ExportSummary> {
    config.validate()?;

    let resolved = discover_and_resolve(config)?;
    let unresolved = resolved.iter().map(|r| r.report.unresolved).sum();
    let apps: Vec<Application> = resolved.into_iter().map(|r| r.application).collect();

    let table = InventoryTable::build(&apps, &ExportOptions::from_config(config));
    let path = config.export_file();
    writer::write_csv(&table, &path)?;

    Ok(ExportSummary {
        path,
        applications: table.applications().len(),
        libraries: table.len(),
        unresolved,
    })
}
