//! The module catalog.
//!
//! A catalog is the read-only list of modules shipped with one Qt release,
//! together with the root module that is always built. It is loaded once
//! (from a TOML file or the built-in Qt 5 list) and shared by every
//! resolution that follows.
//!
//! Catalog format:
//!
//! ```toml
//! root = "qtbase"
//!
//! [modules.qtbase]
//! status = "essential"
//!
//! [modules.qtsvg]
//! branch = "5.15.2"
//! status = "addon"
//! depends = ["qtbase"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::module::{Module, ModuleId, ModuleStatus};
use crate::resolver::errors::ResolveError;

/// Root module used when a catalog does not name one.
pub const DEFAULT_ROOT: &str = "qtbase";

const QT5_MODULES: &str = include_str!("qt5_modules.toml");

/// A validated set of modules.
#[derive(Debug, Clone)]
pub struct ModuleCatalog {
    root: ModuleId,
    modules: BTreeMap<ModuleId, Module>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    root: Option<String>,
    #[serde(default)]
    modules: BTreeMap<String, ModuleEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModuleEntry {
    branch: Option<String>,
    status: ModuleStatus,
    path: Option<String>,
    depends: Vec<String>,
}

impl ModuleCatalog {
    /// Build a catalog from a list of modules.
    ///
    /// Fails if two modules share an id, if the root is missing or not
    /// active, or if any `depends_on` entry names a module that is not in
    /// the list.
    pub fn new(root: impl Into<ModuleId>, modules: Vec<Module>) -> Result<Self, ResolveError> {
        let root = root.into();
        let mut map = BTreeMap::new();

        for module in modules {
            if map.contains_key(&module.id) {
                return Err(ResolveError::DuplicateModule {
                    module: module.id.to_string(),
                });
            }
            map.insert(module.id.clone(), module);
        }

        match map.get(&root) {
            None => {
                return Err(ResolveError::UnknownModule {
                    module: root.to_string(),
                    referenced_by: None,
                })
            }
            Some(m) if !m.is_active() => {
                return Err(ResolveError::InactiveRoot {
                    module: root.to_string(),
                    status: m.status,
                })
            }
            Some(_) => {}
        }

        for module in map.values() {
            for dep in &module.depends_on {
                if !map.contains_key(dep) {
                    return Err(ResolveError::UnknownModule {
                        module: dep.to_string(),
                        referenced_by: Some(module.id.to_string()),
                    });
                }
            }
        }

        Ok(ModuleCatalog { root, modules: map })
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(contents).context("failed to parse module catalog")?;

        let root = file.root.unwrap_or_else(|| DEFAULT_ROOT.to_string());
        let modules = file
            .modules
            .into_iter()
            .map(|(id, entry)| Module {
                path: entry.path.unwrap_or_else(|| id.clone()),
                id: ModuleId::new(id),
                branch: entry.branch,
                status: entry.status,
                depends_on: entry.depends.into_iter().map(ModuleId::new).collect(),
            })
            .collect();

        Ok(ModuleCatalog::new(root, modules)?)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read module catalog: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid module catalog: {}", path.display()))
    }

    /// The module list of Qt 5.15.
    pub fn qt5() -> Result<Self> {
        Self::from_toml_str(QT5_MODULES).context("built-in Qt 5 catalog is invalid")
    }

    /// The module that is always enabled.
    pub fn root(&self) -> &ModuleId {
        &self.root
    }

    /// Look up a module by id.
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Check whether a module id exists (in any status).
    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// All modules, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Modules that take part in resolution, ordered by id.
    pub fn active(&self) -> impl Iterator<Item = &Module> {
        self.modules.values().filter(|m| m.is_active())
    }

    /// Ids of all active modules.
    pub fn active_ids(&self) -> BTreeSet<ModuleId> {
        self.active().map(|m| m.id.clone()).collect()
    }
}
