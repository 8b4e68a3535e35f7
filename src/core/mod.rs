//! Core data structures for qtforge.
//!
//! This module contains the value types every resolution works on:
//! - Modules and the module catalog
//! - Target descriptors (OS, architecture, compiler)
//! - Feature options and module selections
//! - Release identity

pub mod catalog;
pub mod features;
pub mod module;
pub mod release;
pub mod target;

pub use catalog::ModuleCatalog;
pub use features::{
    BuildVariant, FeatureOptions, GraphicsBackend, LinkMode, ModuleSelection, TlsBackend,
    TlsLibrary,
};
pub use module::{Module, ModuleId, ModuleStatus};
pub use release::QtRelease;
pub use target::{Arch, CompilerFamily, ParseEnumError, TargetDescriptor, TargetOs};
