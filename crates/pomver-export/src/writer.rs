//! CSV output of an [`InventoryTable`].

use std::io::Write;
use std::path::Path;

use pomver_util::errors::{PomverError, PomverResult};

use crate::inventory::InventoryTable;

/// Write `table` as CSV to `path`, replacing any existing file.
pub fn write_csv(table: &InventoryTable, path: &Path) -> PomverResult<()> {
    let file = std::fs::File::create(path).map_err(|e| PomverError::Export {
        message: format!("Failed to create {}: {e}", path.display()),
    })?;
    write_csv_to(table, file)?;
    tracing::info!(path = %path.display(), rows = table.len(), "wrote inventory");
    Ok(())
}

/// Write `table` as CSV to any writer.
pub fn write_csv_to<W: Write>(table: &InventoryTable, out: W) -> PomverResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.header()).map_err(export_error)?;
    for row in table.rows() {
        writer.write_record(table.cells(row)).map_err(export_error)?;
    }
    writer.flush().map_err(|e| PomverError::Export {
        message: e.to_string(),
    })?;
    Ok(())
}

fn export_error(err: csv::Error) -> PomverError {
    PomverError::Export {
        message: err.to_string(),
    }
}
