//! Optional feature modules of the Qt source tree.
//!
//! A module is one submodule of the `qt-everywhere` source archive
//! (`qtbase`, `qtsvg`, `qtdeclarative`, ...). Each carries its own
//! enable/skip switch in the configure script and may depend on others.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a module, e.g. `qtbase`.
///
/// Ordered so that sets of modules iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        ModuleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        ModuleId(s.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        ModuleId(s)
    }
}

impl std::borrow::Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of a module.
///
/// Upstream module lists use a richer vocabulary (`essential`, `addon`,
/// `preview`, `deprecated`); all of those are buildable and collapse to
/// [`ModuleStatus::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    #[default]
    #[serde(alias = "essential", alias = "addon", alias = "preview", alias = "deprecated")]
    Active,

    /// Removed upstream; never part of the graph
    Obsolete,

    /// Present in the tree but not a buildable module (`qtqa`, `qtrepotools`)
    Ignore,
}

impl ModuleStatus {
    /// Whether modules with this status take part in resolution.
    pub fn is_active(&self) -> bool {
        matches!(self, ModuleStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Active => "active",
            ModuleStatus::Obsolete => "obsolete",
            ModuleStatus::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,
    /// Version tag the module belongs to (e.g. `5.15.2`)
    pub branch: Option<String>,
    /// Lifecycle status
    pub status: ModuleStatus,
    /// Location relative to the source root once fetched
    pub path: String,
    /// Modules this one requires
    pub depends_on: Vec<ModuleId>,
}

impl Module {
    /// Create an active module whose path equals its id.
    pub fn new(id: impl Into<ModuleId>) -> Self {
        let id = id.into();
        Module {
            path: id.as_str().to_string(),
            id,
            branch: None,
            status: ModuleStatus::Active,
            depends_on: Vec::new(),
        }
    }

    /// Add dependencies.
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ModuleId>,
    {
        self.depends_on.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: ModuleStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the branch tag.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
