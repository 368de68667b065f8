//! Shared utilities for pomver.
//!
//! This crate provides cross-cutting concerns used by all other pomver crates:
//! error types, filesystem path helpers, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod status;
