//! Descriptor resolution engine: populates every module of an application
//! from its descriptor, links parents, and works out an effective version
//! for each declared dependency, falling back to the most similar known
//! group when nothing matches exactly.

pub mod resolver;
pub mod similarity;
pub mod version;
