//! High-level operations.
//!
//! This module contains the implementation of qtforge commands.

pub mod configure;

pub use configure::{configure, load_catalog, package_info, release, ConfigureError};
