//! Configure argument assembly.
//!
//! Turns a target descriptor, feature options and module closure into the
//! argument list of Qt's `configure` script. The order of the groups is
//! fixed because the script is positional for some flags and last-wins for
//! duplicates:
//!
//! 1. license, verbosity and make targets
//! 2. install prefix
//! 3. link mode (`-static` always goes first)
//! 4. build variant
//! 5. one `-skip` per skipped module, by id
//! 6. GUI, widgets, OpenGL and OpenSSL flags
//! 7. `-platform`, when the target maps to an mkspec
//! 8. OS specific flags
//! 9. caller supplied tokens, verbatim

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::builder::errors::FeatureError;
use crate::builder::platform::platform_id;
use crate::builder::resolved::{EnvPlan, ResolvedBuild};
use crate::core::features::{
    BuildVariant, FeatureOptions, GraphicsBackend, LinkMode, TlsBackend, TlsLibrary,
};
use crate::core::module::ModuleId;
use crate::core::target::{CompilerFamily, TargetDescriptor, TargetOs};
use crate::core::ModuleCatalog;

const PREAMBLE: &[&str] = &[
    "-opensource",
    "-confirm-license",
    "-silent",
    "-nomake examples",
    "-nomake tests",
    "-make libs",
    "-make tools",
    "-plugin-sql-sqlite",
];

/// Variables the Windows configure script refuses to run with.
const QMAKE_ENV: &[&str] = &["QMAKESPEC", "XQMAKESPEC", "QMAKEPATH", "QMAKEFEATURES"];

/// Build-tree directories holding the MinGW helper tools.
const MINGW_PATH: &[&str] = &["bin", "qtbase/bin", "gnuwin32/bin", "qtrepotools/bin"];

/// `PATH` entries that make the MinGW configure pick clang over gcc.
const MINGW_PATH_REMOVE: &[&str] = &[r"C:\Program Files\LLVM\bin"];

/// Builds configure arguments for one installation prefix.
#[derive(Debug, Clone)]
pub struct PlatformArgsBuilder {
    prefix: PathBuf,
    tls_library: Option<TlsLibrary>,
}

impl PlatformArgsBuilder {
    /// Create a builder installing into `prefix`.
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        PlatformArgsBuilder {
            prefix: prefix.into(),
            tls_library: None,
        }
    }

    /// Set the OpenSSL installation used for `system-linked` TLS.
    pub fn tls_library(mut self, library: TlsLibrary) -> Self {
        self.tls_library = Some(library);
        self
    }

    /// Reject option combinations the configure script cannot honour.
    pub fn validate(
        &self,
        target: &TargetDescriptor,
        features: &FeatureOptions,
    ) -> Result<(), FeatureError> {
        if features.graphics == GraphicsBackend::Dynamic && target.os != TargetOs::Windows {
            return Err(FeatureError::conflict(
                "graphics=dynamic",
                format!("os={}", target.os),
                "dynamic OpenGL selection is only available on windows",
            ));
        }

        if features.widgets && !features.gui {
            return Err(FeatureError::conflict(
                "widgets=true",
                "gui=false",
                "the widgets module is built on top of the GUI module",
            ));
        }

        if !features.gui && features.graphics != GraphicsBackend::None {
            return Err(FeatureError::conflict(
                format!("graphics={}", features.graphics),
                "gui=false",
                "an OpenGL backend requires the GUI module; use graphics=none",
            ));
        }

        if features.tls == TlsBackend::SystemLinked && self.tls_library.is_none() {
            return Err(FeatureError::conflict(
                "tls=system-linked",
                "tls_library=none",
                "linking OpenSSL needs its include and library paths",
            ));
        }

        Ok(())
    }

    /// Resolve the complete configuration.
    ///
    /// Modules of `catalog` that are active but not in `enabled` are
    /// skipped. An unknown platform is reported through
    /// [`ResolvedBuild::warning`], not as an error.
    pub fn build(
        &self,
        target: &TargetDescriptor,
        features: &FeatureOptions,
        enabled: &BTreeSet<ModuleId>,
        catalog: &ModuleCatalog,
    ) -> Result<ResolvedBuild, FeatureError> {
        self.validate(target, features)?;

        let (platform, warning) = match platform_id(target) {
            Ok(id) => {
                tracing::debug!("platform for {} is `{}`", target, id);
                (Some(id.to_string()), None)
            }
            Err(unsupported) => {
                tracing::warn!("{}", unsupported);
                (None, Some(unsupported))
            }
        };

        let mut args: Vec<String> = PREAMBLE.iter().map(|s| s.to_string()).collect();

        args.push(format!("-prefix {}", self.prefix.display()));

        match features.link {
            LinkMode::Static => args.insert(0, "-static".to_string()),
            LinkMode::Shared => args.push("-shared".to_string()),
        }

        args.extend(variant_flags(features.variant).iter().map(|s| s.to_string()));

        for module in catalog.active_ids().difference(enabled) {
            args.push(format!("-skip {}", module));
        }

        args.extend(self.feature_flags(features));

        if let Some(ref id) = platform {
            args.push(format!("-platform {}", id));
        }

        args.extend(os_flags(target, features).iter().map(|s| s.to_string()));

        args.extend(features.extra.iter().cloned());

        tracing::debug!("configure arguments: {}", args.join(" "));

        Ok(ResolvedBuild {
            arguments: args,
            platform_id: platform,
            warning,
            enabled_modules: enabled.clone(),
            env: env_plan(target),
        })
    }

    fn feature_flags(&self, features: &FeatureOptions) -> Vec<String> {
        let mut flags = Vec::new();

        if !features.gui {
            flags.push("-no-gui".to_string());
        }
        if !features.widgets {
            flags.push("-no-widgets".to_string());
        }

        match features.graphics {
            GraphicsBackend::None => flags.push("-no-opengl".to_string()),
            backend => flags.push(format!("-opengl {}", backend)),
        }

        match features.tls {
            TlsBackend::None => flags.push("-no-openssl".to_string()),
            TlsBackend::Bundled => flags.push("-openssl".to_string()),
            TlsBackend::SystemLinked => {
                flags.push("-openssl-linked".to_string());
                if let Some(ref lib) = self.tls_library {
                    flags.extend(lib.include_dirs.iter().map(|d| format!("-I{}", d.display())));
                    flags.extend(lib.lib_dirs.iter().map(|d| format!("-L{}", d.display())));
                    flags.extend(lib.libs.iter().map(|l| format!("-l{}", l)));
                }
            }
        }

        flags
    }
}

fn variant_flags(variant: BuildVariant) -> &'static [&'static str] {
    match variant {
        BuildVariant::Debug => &["-debug"],
        BuildVariant::Release => &["-release"],
        BuildVariant::ReleaseWithDebugInfo => &["-release", "-force-debug-info"],
        BuildVariant::MinSizeRelease => &["-release", "-optimize-size"],
    }
}

fn os_flags(target: &TargetDescriptor, features: &FeatureOptions) -> &'static [&'static str] {
    match (target.os, target.compiler) {
        // xcb is the windowing backend; it does not exist without the GUI module
        (TargetOs::Linux, _) if features.gui => &["-xcb"],
        (TargetOs::Macos, _) => &["-no-framework"],
        (TargetOs::Windows | TargetOs::WindowsStore, CompilerFamily::Msvc) => &["-mp"],
        (TargetOs::Windows, CompilerFamily::Gcc) => &["-developer-build"],
        _ => &[],
    }
}

fn env_plan(target: &TargetDescriptor) -> EnvPlan {
    let mut env = EnvPlan::default();

    if target.os.is_windows_family() {
        env.unset = QMAKE_ENV.iter().map(|s| s.to_string()).collect();
    }
    if target.os == TargetOs::Windows && target.compiler == CompilerFamily::Gcc {
        env.path_prepend = MINGW_PATH.iter().map(|s| s.to_string()).collect();
        env.path_remove = MINGW_PATH_REMOVE.iter().map(|s| s.to_string()).collect();
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::Arch;
    use crate::test_support::{catalog, ids, linux, msvc, static_features, system_openssl};

    fn small_catalog() -> ModuleCatalog {
        catalog(&[
            ("qtbase", &[]),
            ("qtsvg", &["qtbase"]),
            ("qtdeclarative", &["qtbase"]),
            ("qttools", &["qtbase"]),
        ])
    }

    fn build(target: &TargetDescriptor, features: &FeatureOptions) -> ResolvedBuild {
        PlatformArgsBuilder::new("/opt/qt")
            .build(target, features, &ids(&["qtbase", "qtsvg"]), &small_catalog())
            .unwrap()
    }

    fn position(args: &[String], flag: &str) -> usize {
        args.iter()
            .position(|a| a == flag)
            .unwrap_or_else(|| panic!("`{}` missing from {:?}", flag, args))
    }

    #[test]
    fn test_linux_gcc_release_shared() {
        let resolved = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &FeatureOptions::default());

        assert_eq!(
            resolved.arguments,
            vec![
                "-opensource",
                "-confirm-license",
                "-silent",
                "-nomake examples",
                "-nomake tests",
                "-make libs",
                "-make tools",
                "-plugin-sql-sqlite",
                "-prefix /opt/qt",
                "-shared",
                "-release",
                "-skip qtdeclarative",
                "-skip qttools",
                "-opengl desktop",
                "-no-openssl",
                "-platform linux-g++",
                "-xcb",
            ]
        );
        assert_eq!(resolved.platform_id.as_deref(), Some("linux-g++"));
        assert!(resolved.warning.is_none());
        assert!(resolved.env.is_empty());
    }

    #[test]
    fn test_static_flag_first() {
        let resolved = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &static_features());

        assert_eq!(resolved.arguments[0], "-static");
        assert!(!resolved.arguments.contains(&"-shared".to_string()));
    }

    #[test]
    fn test_shared_never_emits_static() {
        let resolved = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &FeatureOptions::default());
        assert!(!resolved.arguments.contains(&"-static".to_string()));
    }

    #[test]
    fn test_variant_modifiers() {
        let target = linux(CompilerFamily::Gcc, Arch::X86_64);
        let cases = [
            (BuildVariant::Debug, vec!["-debug"]),
            (BuildVariant::ReleaseWithDebugInfo, vec!["-release", "-force-debug-info"]),
            (BuildVariant::MinSizeRelease, vec!["-release", "-optimize-size"]),
        ];

        for (variant, expected) in cases {
            let features = FeatureOptions {
                variant,
                ..FeatureOptions::default()
            };
            let args = build(&target, &features).arguments;
            let start = position(&args, "-shared") + 1;
            assert_eq!(&args[start..start + expected.len()], expected.as_slice());
        }
    }

    #[test]
    fn test_skips_sorted_by_id() {
        let catalog = catalog(&[("qtbase", &[]), ("qtz", &[]), ("qta", &[]), ("qtm", &[])]);
        let resolved = PlatformArgsBuilder::new("/p")
            .build(
                &linux(CompilerFamily::Gcc, Arch::X86_64),
                &FeatureOptions::default(),
                &ids(&["qtbase"]),
                &catalog,
            )
            .unwrap();

        let skips: Vec<_> = resolved
            .arguments
            .iter()
            .filter(|a| a.starts_with("-skip "))
            .cloned()
            .collect();
        assert_eq!(skips, vec!["-skip qta", "-skip qtm", "-skip qtz"]);
    }

    #[test]
    fn test_unsupported_platform_still_builds() {
        let resolved = build(&linux(CompilerFamily::Gcc, Arch::Mips), &FeatureOptions::default());

        assert!(resolved.platform_id.is_none());
        assert!(resolved.warning.is_some());
        assert!(!resolved.arguments.iter().any(|a| a.starts_with("-platform")));
        assert!(resolved.arguments.contains(&"-xcb".to_string()));
    }

    #[test]
    fn test_dynamic_graphics_rejected_off_windows() {
        let features = FeatureOptions {
            graphics: GraphicsBackend::Dynamic,
            ..FeatureOptions::default()
        };
        let err = PlatformArgsBuilder::new("/opt/qt")
            .build(
                &linux(CompilerFamily::Gcc, Arch::X86_64),
                &features,
                &ids(&["qtbase"]),
                &small_catalog(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            FeatureError::InvalidCombination {
                first: "graphics=dynamic".to_string(),
                second: "os=linux".to_string(),
                reason: "dynamic OpenGL selection is only available on windows".to_string(),
            }
        );
    }

    #[test]
    fn test_dynamic_graphics_on_windows() {
        let features = FeatureOptions {
            graphics: GraphicsBackend::Dynamic,
            ..FeatureOptions::default()
        };
        let resolved = build(&msvc("15"), &features);

        assert!(resolved.arguments.contains(&"-opengl dynamic".to_string()));
        assert!(resolved.arguments.contains(&"-platform win32-msvc2017".to_string()));
        assert_eq!(resolved.arguments.last().map(String::as_str), Some("-mp"));
        assert_eq!(resolved.env.unset, vec!["QMAKESPEC", "XQMAKESPEC", "QMAKEPATH", "QMAKEFEATURES"]);
        assert!(resolved.env.path_prepend.is_empty());
        assert!(resolved.env.path_remove.is_empty());
    }

    #[test]
    fn test_widgets_without_gui_rejected() {
        let features = FeatureOptions {
            gui: false,
            graphics: GraphicsBackend::None,
            ..FeatureOptions::default()
        };
        let err = PlatformArgsBuilder::new("/p")
            .validate(&linux(CompilerFamily::Gcc, Arch::X86_64), &features)
            .unwrap_err();
        assert!(err.to_string().contains("widgets=true"));
        assert!(err.to_string().contains("gui=false"));
    }

    #[test]
    fn test_headless_build() {
        let features = FeatureOptions {
            gui: false,
            widgets: false,
            graphics: GraphicsBackend::None,
            ..FeatureOptions::default()
        };
        let args = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &features).arguments;

        let gui = position(&args, "-no-gui");
        assert_eq!(args[gui + 1], "-no-widgets");
        assert_eq!(args[gui + 2], "-no-opengl");
        assert!(!args.contains(&"-xcb".to_string()));
    }

    #[test]
    fn test_system_linked_tls() {
        let features = FeatureOptions {
            tls: TlsBackend::SystemLinked,
            ..FeatureOptions::default()
        };
        let resolved = PlatformArgsBuilder::new("/opt/qt")
            .tls_library(system_openssl())
            .build(
                &linux(CompilerFamily::Gcc, Arch::X86_64),
                &features,
                &ids(&["qtbase"]),
                &small_catalog(),
            )
            .unwrap();

        let args = &resolved.arguments;
        let linked = position(args, "-openssl-linked");
        assert_eq!(args[linked + 1], "-I/usr/include/ssl");
        assert_eq!(args[linked + 2], "-L/usr/lib/ssl");
        assert_eq!(args[linked + 3], "-lssl");
        assert_eq!(args[linked + 4], "-lcrypto");
    }

    #[test]
    fn test_system_linked_tls_requires_library() {
        let features = FeatureOptions {
            tls: TlsBackend::SystemLinked,
            ..FeatureOptions::default()
        };
        let err = PlatformArgsBuilder::new("/p")
            .validate(&linux(CompilerFamily::Gcc, Arch::X86_64), &features)
            .unwrap_err();
        assert!(err.to_string().contains("tls=system-linked"));
    }

    #[test]
    fn test_bundled_tls() {
        let features = FeatureOptions {
            tls: TlsBackend::Bundled,
            ..FeatureOptions::default()
        };
        let args = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &features).arguments;
        assert!(args.contains(&"-openssl".to_string()));
        assert!(!args.contains(&"-no-openssl".to_string()));
    }

    #[test]
    fn test_extra_tokens_last() {
        let features = FeatureOptions {
            extra: vec!["-no-dbus".to_string(), "-platform custom".to_string()],
            ..FeatureOptions::default()
        };
        let args = build(&linux(CompilerFamily::Gcc, Arch::X86_64), &features).arguments;

        let n = args.len();
        assert_eq!(args[n - 2], "-no-dbus");
        assert_eq!(args[n - 1], "-platform custom");
        assert!(position(&args, "-platform linux-g++") < n - 2);
    }

    #[test]
    fn test_os_specific_flags() {
        let mac = TargetDescriptor::new(TargetOs::Macos, Arch::X86_64, CompilerFamily::Clang);
        let args = build(&mac, &FeatureOptions::default()).arguments;
        assert_eq!(args.last().map(String::as_str), Some("-no-framework"));

        let mingw = TargetDescriptor::new(TargetOs::Windows, Arch::X86_64, CompilerFamily::Gcc);
        let resolved = build(&mingw, &FeatureOptions::default());
        assert!(resolved.arguments.contains(&"-platform win32-g++".to_string()));
        assert!(resolved.arguments.contains(&"-developer-build".to_string()));
        assert_eq!(resolved.env.path_prepend[1], "qtbase/bin");
        assert_eq!(resolved.env.path_remove, vec![r"C:\Program Files\LLVM\bin"]);
    }

    #[test]
    fn test_deterministic() {
        let target = msvc("14");
        let features = static_features();
        let first = build(&target, &features);
        let second = build(&target, &features);

        assert_eq!(first.command_line(), second.command_line());
        assert_eq!(first, second);
    }
}
