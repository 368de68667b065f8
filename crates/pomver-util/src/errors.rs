use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pomver operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PomverError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration (e.g. pomver.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your pomver.toml and command-line flags"))]
    Config { message: String },

    /// A search location is missing or is not a directory.
    #[error("Discovery failed: {message}")]
    #[diagnostic(help("The root directory must exist and contain one directory per application"))]
    Discovery { message: String },

    /// A build descriptor could not be parsed.
    #[error("Descriptor error: {message}")]
    Descriptor { message: String },

    /// Writing the inventory export failed.
    #[error("Export failed: {message}")]
    Export { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PomverResult<T> = miette::Result<T>;
