//! The output of a configuration resolution.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::builder::platform::UnsupportedPlatform;
use crate::core::module::ModuleId;

/// Environment changes the native builder must apply before running the
/// configure step. Nothing here touches the current process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvPlan {
    /// Variables to remove; the configure script refuses to run with them set
    pub unset: Vec<String>,
    /// Directories, relative to the build tree, to put in front of `PATH`
    pub path_prepend: Vec<String>,
    /// Exact `PATH` entries to drop
    pub path_remove: Vec<String>,
}

impl EnvPlan {
    pub fn is_empty(&self) -> bool {
        self.unset.is_empty() && self.path_prepend.is_empty() && self.path_remove.is_empty()
    }
}

/// A fully resolved build configuration.
///
/// Computed once per build and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBuild {
    /// Configure arguments, in order
    pub arguments: Vec<String>,
    /// mkspec name, when one is known for the target
    pub platform_id: Option<String>,
    /// Why `platform_id` is absent
    pub warning: Option<UnsupportedPlatform>,
    /// Modules that will be built
    pub enabled_modules: BTreeSet<ModuleId>,
    /// Environment changes for the configure step
    pub env: EnvPlan,
}

impl ResolvedBuild {
    /// Arguments joined the way the configure script expects them.
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }

    /// Whether a platform identifier was resolved.
    pub fn has_platform(&self) -> bool {
        self.platform_id.is_some()
    }
}
