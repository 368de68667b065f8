//! Export of resolved applications as a library-by-application version
//! table.

pub mod inventory;
pub mod writer;

pub use inventory::{ExportOptions, InventoryRow, InventoryTable};
