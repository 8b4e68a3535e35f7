//! qtforge - build configuration resolver for Qt source packages
//!
//! This crate computes which Qt modules to build from a module catalog and
//! a selection, and turns the result plus target and feature options into
//! the argument list of Qt's `configure` script.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for qtforge unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use builder::{PlatformArgsBuilder, ResolvedBuild};
pub use crate::core::{FeatureOptions, ModuleCatalog, ModuleSelection, TargetDescriptor};
pub use resolver::{ModuleGraphResolver, ResolveError};
