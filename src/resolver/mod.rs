//! Module resolution.
//!
//! Computes the set of modules to build from a catalog and a selection.
//! The resolver is pure and deterministic - catalog loading happens before
//! resolution and nothing is retained between calls.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::{resolve, ModuleGraphResolver, ModuleResolution};
