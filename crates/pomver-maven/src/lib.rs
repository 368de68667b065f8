//! Maven descriptor access: a namespace-aware XML element tree, the POM
//! vocabulary read from it, and discovery of descriptor files on disk.

pub mod discovery;
pub mod pom;
pub mod xml;
