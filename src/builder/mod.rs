//! Configure argument generation.
//!
//! This module turns a resolved module set plus target and feature options
//! into the inputs of the native configure step: the argument list, the
//! platform identifier, the environment plan and the package metadata.

pub mod args;
pub mod errors;
pub mod package_info;
pub mod platform;
pub mod resolved;

pub use args::PlatformArgsBuilder;
pub use errors::FeatureError;
pub use package_info::PackageInfo;
pub use platform::{platform_id, UnsupportedPlatform};
pub use resolved::{EnvPlan, ResolvedBuild};
