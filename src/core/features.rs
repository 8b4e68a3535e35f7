//! User-facing build options.
//!
//! These are the knobs a package consumer sets (link mode, graphics and TLS
//! backends, GUI/widgets, build variant) plus the module selection. They
//! are translated into configure arguments by
//! [`crate::builder::PlatformArgsBuilder`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::module::ModuleId;
use crate::core::target::ParseEnumError;

/// How the library is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    #[default]
    #[serde(alias = "dynamic")]
    Shared,
    Static,
}

impl LinkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkMode::Shared => "shared",
            LinkMode::Static => "static",
        }
    }
}

impl FromStr for LinkMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" | "dynamic" => Ok(LinkMode::Shared),
            "static" => Ok(LinkMode::Static),
            _ => Err(ParseEnumError::new("link mode", s, "shared, static")),
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenGL backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsBackend {
    #[serde(alias = "no")]
    None,
    Es2,
    #[default]
    Desktop,
    /// Runtime selection between desktop GL and ANGLE (Windows only)
    Dynamic,
}

impl GraphicsBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphicsBackend::None => "none",
            GraphicsBackend::Es2 => "es2",
            GraphicsBackend::Desktop => "desktop",
            GraphicsBackend::Dynamic => "dynamic",
        }
    }
}

impl FromStr for GraphicsBackend {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "no" => Ok(GraphicsBackend::None),
            "es2" => Ok(GraphicsBackend::Es2),
            "desktop" => Ok(GraphicsBackend::Desktop),
            "dynamic" => Ok(GraphicsBackend::Dynamic),
            _ => Err(ParseEnumError::new(
                "graphics backend",
                s,
                "none, es2, desktop, dynamic",
            )),
        }
    }
}

impl fmt::Display for GraphicsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenSSL integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    #[default]
    #[serde(alias = "no")]
    None,
    /// Loaded at runtime
    #[serde(alias = "yes")]
    Bundled,
    /// Linked at build time against an external OpenSSL
    #[serde(alias = "linked")]
    SystemLinked,
}

impl TlsBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsBackend::None => "none",
            TlsBackend::Bundled => "bundled",
            TlsBackend::SystemLinked => "system-linked",
        }
    }
}

impl FromStr for TlsBackend {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "no" => Ok(TlsBackend::None),
            "bundled" | "yes" => Ok(TlsBackend::Bundled),
            "system-linked" | "linked" => Ok(TlsBackend::SystemLinked),
            _ => Err(ParseEnumError::new(
                "TLS backend",
                s,
                "none, bundled, system-linked",
            )),
        }
    }
}

impl fmt::Display for TlsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildVariant {
    #[serde(alias = "Debug")]
    Debug,
    #[default]
    #[serde(alias = "Release")]
    Release,
    #[serde(alias = "RelWithDebInfo", alias = "relwithdebinfo")]
    ReleaseWithDebugInfo,
    #[serde(alias = "MinSizeRel", alias = "minsizerel")]
    MinSizeRelease,
}

impl BuildVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Release => "release",
            BuildVariant::ReleaseWithDebugInfo => "release-with-debug-info",
            BuildVariant::MinSizeRelease => "min-size-release",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildVariant::Debug)
    }
}

impl FromStr for BuildVariant {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildVariant::Debug),
            "release" => Ok(BuildVariant::Release),
            "release-with-debug-info" | "relwithdebinfo" => Ok(BuildVariant::ReleaseWithDebugInfo),
            "min-size-release" | "minsizerel" => Ok(BuildVariant::MinSizeRelease),
            _ => Err(ParseEnumError::new(
                "build variant",
                s,
                "debug, release, release-with-debug-info, min-size-release",
            )),
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An externally provided OpenSSL installation.
///
/// Only consulted for [`TlsBackend::SystemLinked`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsLibrary {
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    /// Library names without the `lib` prefix or extension (`ssl`, `crypto`)
    pub libs: Vec<String>,
}

/// Feature options of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOptions {
    pub link: LinkMode,
    pub graphics: GraphicsBackend,
    pub tls: TlsBackend,
    pub gui: bool,
    pub widgets: bool,
    pub variant: BuildVariant,
    /// Raw configure tokens appended verbatim after everything else
    pub extra: Vec<String>,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        FeatureOptions {
            link: LinkMode::Shared,
            graphics: GraphicsBackend::Desktop,
            tls: TlsBackend::None,
            gui: true,
            widgets: true,
            variant: BuildVariant::Release,
            extra: Vec::new(),
        }
    }
}

/// Which modules the caller asked for.
///
/// A `false` entry only means "not requested"; the module is still enabled
/// when a requested module depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSelection(BTreeMap<ModuleId, bool>);

impl ModuleSelection {
    pub fn new() -> Self {
        ModuleSelection(BTreeMap::new())
    }

    /// Request a module.
    pub fn request(&mut self, id: impl Into<ModuleId>) -> &mut Self {
        self.0.insert(id.into(), true);
        self
    }

    /// Set the flag of a module explicitly.
    pub fn set(&mut self, id: impl Into<ModuleId>, requested: bool) -> &mut Self {
        self.0.insert(id.into(), requested);
        self
    }

    /// Ids with the flag set, in order.
    pub fn requested(&self) -> impl Iterator<Item = &ModuleId> {
        self.0.iter().filter(|(_, &on)| on).map(|(id, _)| id)
    }

    /// Every id mentioned, requested or not.
    pub fn mentioned(&self) -> impl Iterator<Item = &ModuleId> {
        self.0.keys()
    }

    /// Overlay another selection; its entries win.
    pub fn merge(&mut self, other: ModuleSelection) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<ModuleId>> FromIterator<S> for ModuleSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ModuleSelection(iter.into_iter().map(|id| (id.into(), true)).collect())
    }
}
