use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pomver_util::errors::{PomverError, PomverResult};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pomver.toml";

/// Run configuration loaded from `pomver.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InventoryConfig {
    /// Directory whose immediate children are applications.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Export file path without extension; `.csv` is appended.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    #[serde(default = "default_descriptor_name")]
    pub descriptor_name: String,

    #[serde(default)]
    pub ignore_group_ids: BTreeSet<String>,

    #[serde(default)]
    pub ignore_applications: BTreeSet<String>,

    /// Glob patterns for directories never descended into during discovery.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Export cell for applications that do not use a library.
    #[serde(default = "default_missing_placeholder")]
    pub missing_placeholder: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            export_path: default_export_path(),
            descriptor_name: default_descriptor_name(),
            ignore_group_ids: BTreeSet::new(),
            ignore_applications: BTreeSet::new(),
            exclude_dirs: default_exclude_dirs(),
            missing_placeholder: default_missing_placeholder(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_path() -> PathBuf {
    PathBuf::from("dependencies")
}

fn default_descriptor_name() -> String {
    "pom.xml".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        "**/target".to_string(),
        "**/.git".to_string(),
        "**/node_modules".to_string(),
    ]
}

fn default_missing_placeholder() -> String {
    "NotExist".to_string()
}

impl InventoryConfig {
    /// Parse a config from TOML text.
    pub fn parse(content: &str) -> PomverResult<Self> {
        toml::from_str(content).map_err(|e| {
            PomverError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> PomverResult<Self> {
        if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(|e| PomverError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
            Self::parse(&content)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path, which must exist, or fall back to
    /// `pomver.toml` in `cwd`.
    pub fn load_from(explicit: Option<&Path>, cwd: &Path) -> PomverResult<Self> {
        match explicit {
            Some(path) if !path.is_file() => Err(PomverError::Config {
                message: format!("Config file {} does not exist", path.display()),
            }
            .into()),
            Some(path) => Self::load(path),
            None => Self::load(&cwd.join(CONFIG_FILE_NAME)),
        }
    }

    /// The export file path with its `.csv` extension.
    pub fn export_file(&self) -> PathBuf {
        let mut file = self.export_path.clone().into_os_string();
        file.push(".csv");
        PathBuf::from(file)
    }

    /// Check the structural preconditions of a run: the root directory and
    /// the export file's directory must both exist and be directories.
    pub fn validate(&self) -> PomverResult<()> {
        if !self.root_dir.is_dir() {
            return Err(PomverError::Discovery {
                message: format!("{} is not a directory.", self.root_dir.display()),
            }
            .into());
        }
        let export_dir = match self.export_file().parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !export_dir.is_dir() {
            return Err(PomverError::Discovery {
                message: format!("{} is not a directory.", export_dir.display()),
            }
            .into());
        }
        Ok(())
    }
}
