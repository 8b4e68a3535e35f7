//! Configuration file support for qtforge.
//!
//! qtforge supports two configuration file locations:
//! - Global: `~/.qtforge/config.toml` - User-wide defaults
//! - Project: `qtforge.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::features::{
    BuildVariant, FeatureOptions, GraphicsBackend, LinkMode, ModuleSelection, TlsBackend,
    TlsLibrary,
};
use crate::core::target::{Arch, CompilerFamily, TargetDescriptor, TargetOs};

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "qtforge.toml";

/// Install prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "./install";

/// qtforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Installation prefix passed to configure
    pub prefix: Option<PathBuf>,

    /// Module catalog file (built-in Qt 5 catalog when unset)
    pub catalog: Option<PathBuf>,

    /// Qt release, e.g. `5.15.2`
    pub version: Option<String>,

    /// Target settings
    pub target: TargetConfig,

    /// Feature settings
    pub features: FeaturesConfig,

    /// Module selection, id to requested flag
    pub modules: ModuleSelection,

    /// OpenSSL installation for `tls = "system-linked"`
    pub tls_library: Option<TlsLibrary>,
}

/// Target-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub os: Option<TargetOs>,
    pub arch: Option<Arch>,
    pub compiler: Option<CompilerFamily>,

    /// Compiler version token (`14`, `2017`, `19.1`, ...)
    pub compiler_version: Option<String>,

    /// Use libc++ with clang
    pub libcxx: Option<bool>,
}

/// Feature-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub link: Option<LinkMode>,
    pub graphics: Option<GraphicsBackend>,
    pub tls: Option<TlsBackend>,
    pub gui: Option<bool>,
    pub widgets: Option<bool>,
    pub variant: Option<BuildVariant>,

    /// Extra configure tokens
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Everything a configure run needs, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub target: TargetDescriptor,
    pub features: FeatureOptions,
    pub selection: ModuleSelection,
    pub prefix: PathBuf,
    pub tls_library: Option<TlsLibrary>,
    pub catalog: Option<PathBuf>,
    pub version: Option<String>,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Config::default().to_request()
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.prefix.is_some() {
            self.prefix = other.prefix;
        }
        if other.catalog.is_some() {
            self.catalog = other.catalog;
        }
        if other.version.is_some() {
            self.version = other.version;
        }

        // Target settings
        if other.target.os.is_some() {
            self.target.os = other.target.os;
        }
        if other.target.arch.is_some() {
            self.target.arch = other.target.arch;
        }
        if other.target.compiler.is_some() {
            self.target.compiler = other.target.compiler;
        }
        if other.target.compiler_version.is_some() {
            self.target.compiler_version = other.target.compiler_version;
        }
        if other.target.libcxx.is_some() {
            self.target.libcxx = other.target.libcxx;
        }

        // Feature settings
        if other.features.link.is_some() {
            self.features.link = other.features.link;
        }
        if other.features.graphics.is_some() {
            self.features.graphics = other.features.graphics;
        }
        if other.features.tls.is_some() {
            self.features.tls = other.features.tls;
        }
        if other.features.gui.is_some() {
            self.features.gui = other.features.gui;
        }
        if other.features.widgets.is_some() {
            self.features.widgets = other.features.widgets;
        }
        if other.features.variant.is_some() {
            self.features.variant = other.features.variant;
        }
        if !other.features.extra.is_empty() {
            self.features.extra = other.features.extra;
        }

        // Module flags are unioned, the overriding layer wins per module
        self.modules.merge(other.modules);

        if other.tls_library.is_some() {
            self.tls_library = other.tls_library;
        }
    }

    /// The target descriptor, with unset fields taken from the host.
    pub fn target(&self) -> TargetDescriptor {
        let os = self.target.os.unwrap_or_else(TargetOs::host);
        let arch = self.target.arch.unwrap_or_else(Arch::host);
        let compiler = self
            .target
            .compiler
            .unwrap_or_else(|| CompilerFamily::default_for(os));

        let mut target = TargetDescriptor::new(os, arch, compiler)
            .with_libcxx(self.target.libcxx.unwrap_or(false));
        if let Some(ref version) = self.target.compiler_version {
            target = target.with_compiler_version(version.clone());
        }
        target
    }

    /// Feature options for `os`, with unset fields defaulted.
    ///
    /// Turning the GUI off also turns widgets and OpenGL off unless they
    /// are set explicitly.
    pub fn features(&self, os: TargetOs) -> FeatureOptions {
        let defaults = FeatureOptions::default();
        let gui = self.features.gui.unwrap_or(defaults.gui);

        let graphics = match self.features.graphics {
            Some(graphics) => graphics,
            None if !gui => GraphicsBackend::None,
            None => default_graphics(os),
        };

        FeatureOptions {
            link: self.features.link.unwrap_or(defaults.link),
            graphics,
            tls: self.features.tls.unwrap_or(defaults.tls),
            gui,
            widgets: self.features.widgets.unwrap_or(gui && defaults.widgets),
            variant: self.features.variant.unwrap_or(defaults.variant),
            extra: self.features.extra.clone(),
        }
    }

    /// Apply defaults and produce a build request.
    pub fn to_request(&self) -> BuildRequest {
        let target = self.target();
        let features = self.features(target.os);

        BuildRequest {
            target,
            features,
            selection: self.modules.clone(),
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFIX)),
            tls_library: self.tls_library.clone(),
            catalog: self.catalog.clone(),
            version: self.version.clone(),
        }
    }
}

/// Desktop OpenGL where it exists, OpenGL ES 2 on mobile targets.
fn default_graphics(os: TargetOs) -> GraphicsBackend {
    match os {
        TargetOs::Android | TargetOs::Ios | TargetOs::Tvos | TargetOs::Watchos => {
            GraphicsBackend::Es2
        }
        _ => GraphicsBackend::Desktop,
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (qtforge.toml)
/// 2. Global config (~/.qtforge/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global qtforge config directory (~/.qtforge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".qtforge"))
}

/// Get the global config path (~/.qtforge/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (qtforge.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::ModuleId;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.prefix.is_none());
        assert!(config.target.os.is_none());
        assert!(config.modules.is_empty());

        let request = config.to_request();
        assert_eq!(request.prefix, PathBuf::from("./install"));
        assert_eq!(request.target, TargetDescriptor::host());
        assert_eq!(request.features.link, LinkMode::Shared);
        assert_eq!(request.features.tls, TlsBackend::None);
        assert!(request.features.gui);
        assert!(request.features.widgets);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("qtforge.toml");

        std::fs::write(
            &config_path,
            r#"
prefix = "/opt/qt"
version = "5.9.3"

[target]
os = "windows"
arch = "x86_64"
compiler = "msvc"
compiler_version = "15"

[features]
link = "static"
tls = "system-linked"
variant = "debug"
extra = ["-no-dbus"]

[modules]
qtsvg = true
qttools = false

[tls_library]
include_dirs = ["C:/openssl/include"]
lib_dirs = ["C:/openssl/lib"]
libs = ["libssl", "libcrypto"]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.prefix, Some(PathBuf::from("/opt/qt")));
        assert_eq!(config.target.os, Some(TargetOs::Windows));
        assert_eq!(config.target.compiler, Some(CompilerFamily::Msvc));
        assert_eq!(config.features.tls, Some(TlsBackend::SystemLinked));

        let request = config.to_request();
        assert_eq!(request.target.compiler_version.as_deref(), Some("15"));
        assert_eq!(request.features.link, LinkMode::Static);
        assert_eq!(request.features.variant, BuildVariant::Debug);
        assert_eq!(request.features.graphics, GraphicsBackend::Desktop);
        assert_eq!(request.features.extra, vec!["-no-dbus"]);
        assert_eq!(
            request.selection.requested().collect::<Vec<_>>(),
            vec![&ModuleId::from("qtsvg")]
        );
        assert_eq!(request.tls_library.unwrap().libs, vec!["libssl", "libcrypto"]);
        assert_eq!(request.version.as_deref(), Some("5.9.3"));
    }

    #[test]
    fn test_config_load_rejects_unknown_value() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("qtforge.toml");
        std::fs::write(&config_path, "[features]\nlink = \"sometimes\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.prefix = Some(PathBuf::from("/usr/local"));
        base.features.link = Some(LinkMode::Static);
        base.features.extra = vec!["-no-dbus".to_string()];
        base.modules.request("qtsvg");
        base.modules.request("qttools");

        let mut override_cfg = Config::default();
        override_cfg.features.link = Some(LinkMode::Shared);
        override_cfg.modules.set("qttools", false);

        base.merge(override_cfg);

        assert_eq!(base.features.link, Some(LinkMode::Shared));
        assert_eq!(base.prefix, Some(PathBuf::from("/usr/local"))); // Not overridden
        assert_eq!(base.features.extra, vec!["-no-dbus"]);
        assert_eq!(
            base.modules.requested().collect::<Vec<_>>(),
            vec![&ModuleId::from("qtsvg")]
        );
        assert_eq!(base.modules.mentioned().count(), 2);
    }

    #[test]
    fn test_headless_defaults() {
        let mut config = Config::default();
        config.features.gui = Some(false);

        let features = config.features(TargetOs::Linux);
        assert!(!features.gui);
        assert!(!features.widgets);
        assert_eq!(features.graphics, GraphicsBackend::None);
    }

    #[test]
    fn test_mobile_defaults_to_es2() {
        let mut config = Config::default();
        config.target.os = Some(TargetOs::Android);

        let request = config.to_request();
        assert_eq!(request.target.compiler, CompilerFamily::Clang);
        assert_eq!(request.features.graphics, GraphicsBackend::Es2);
    }

    #[test]
    fn test_compiler_default_follows_os() {
        let mut config = Config::default();
        config.target.os = Some(TargetOs::Solaris);
        assert_eq!(config.target().compiler, CompilerFamily::SunCc);

        config.target.os = Some(TargetOs::Linux);
        assert_eq!(config.target().compiler, CompilerFamily::Gcc);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        // Create global config
        std::fs::write(
            &global_path,
            r#"
prefix = "/opt/qt"

[target]
os = "linux"
compiler = "gcc"
"#,
        )
        .unwrap();

        // Create project config that overrides the compiler but not the os
        std::fs::write(
            &project_path,
            r#"
[target]
compiler = "clang"
libcxx = true
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);

        assert_eq!(config.target.os, Some(TargetOs::Linux));
        assert_eq!(config.target.compiler, Some(CompilerFamily::Clang));
        assert_eq!(config.target.libcxx, Some(true));
        assert_eq!(config.prefix, Some(PathBuf::from("/opt/qt")));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("a.toml"), &tmp.path().join("b.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_config_path() {
        let path = project_config_path(Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/qtforge.toml"));
    }
}
