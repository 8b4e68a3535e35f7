//! Shared utilities

pub mod config;
pub mod diagnostic;

pub use config::{BuildRequest, Config};
pub use diagnostic::Diagnostic;
