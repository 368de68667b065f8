//! Core data types for pomver.
//!
//! This crate defines the in-memory model of an inventory run: applications,
//! the modules (build descriptors) they own, the dependencies each module
//! declares, and the run configuration.
//!
//! This crate is intentionally free of XML parsing and filesystem traversal.

/// Version assigned to a dependency when no resolution strategy succeeds.
pub const UNRESOLVED_VERSION: &str = "NotFound";

pub mod application;
pub mod config;
pub mod dependency;
pub mod module;
