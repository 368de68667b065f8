//! Build the library-by-application version table from resolved
//! applications.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use pomver_core::application::Application;
use pomver_core::config::InventoryConfig;
use pomver_core::dependency::LibraryKey;

/// Header of the first column.
pub const LIBRARY_COLUMN: &str = "GroupID:ArtifactID";

/// Which applications and groups end up in the table, and what fills the
/// cells of applications that do not use a library.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub ignore_group_ids: BTreeSet<String>,
    pub ignore_applications: BTreeSet<String>,
    pub missing_placeholder: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&InventoryConfig::default())
    }
}

impl ExportOptions {
    pub fn from_config(config: &InventoryConfig) -> Self {
        Self {
            ignore_group_ids: config.ignore_group_ids.clone(),
            ignore_applications: config.ignore_applications.clone(),
            missing_placeholder: config.missing_placeholder.clone(),
        }
    }
}

/// One library and the version each application uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub library: LibraryKey,
    /// Application name to version. Applications not using the library are
    /// absent.
    pub versions: HashMap<String, String>,
}

impl InventoryRow {
    /// Number of applications using the library.
    pub fn usage(&self) -> usize {
        self.versions.len()
    }
}

/// The inventory, ready to be written out.
#[derive(Debug, Clone)]
pub struct InventoryTable {
    applications: Vec<String>,
    rows: Vec<InventoryRow>,
    missing_placeholder: String,
}

impl InventoryTable {
    /// Collect every dependency of every non-ignored application.
    ///
    /// Rows are ordered by usage count, then group id, then artifact id, all
    /// descending. If several modules of one application declare the same
    /// library, the module processed last wins.
    pub fn build(apps: &[Application], opts: &ExportOptions) -> Self {
        let mut applications = Vec::new();
        let mut libraries: BTreeMap<LibraryKey, HashMap<String, String>> = BTreeMap::new();

        for app in apps {
            if opts.ignore_applications.contains(&app.name) {
                tracing::debug!(application = %app.name, "ignored application");
                continue;
            }
            applications.push(app.name.clone());
            for dep in app.modules().iter().flat_map(|m| &m.dependencies) {
                if opts.ignore_group_ids.contains(dep.group_id()) {
                    continue;
                }
                libraries
                    .entry(dep.key())
                    .or_default()
                    .insert(app.name.clone(), dep.version().to_string());
            }
        }

        let mut rows: Vec<InventoryRow> = libraries
            .into_iter()
            .map(|(library, versions)| InventoryRow { library, versions })
            .collect();
        rows.sort_by(|a, b| {
            b.usage()
                .cmp(&a.usage())
                .then_with(|| b.library.cmp(&a.library))
        });

        Self {
            applications,
            rows,
            missing_placeholder: opts.missing_placeholder.clone(),
        }
    }

    /// Application columns, in input order.
    pub fn applications(&self) -> &[String] {
        &self.applications
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Vec<&str> {
        std::iter::once(LIBRARY_COLUMN)
            .chain(self.applications.iter().map(String::as_str))
            .collect()
    }

    /// The cells of one row: the library, then one version or placeholder
    /// per application column.
    pub fn cells(&self, row: &InventoryRow) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.applications.len() + 1);
        cells.push(row.library.to_string());
        for app in &self.applications {
            let cell = row.versions.get(app).unwrap_or(&self.missing_placeholder);
            cells.push(cell.clone());
        }
        cells
    }
}
