//! End-to-end configuration: selection, module closure, configure arguments.

use anyhow::Result;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::builder::{PackageInfo, PlatformArgsBuilder, ResolvedBuild};
use crate::builder::errors::FeatureError;
use crate::core::{ModuleCatalog, QtRelease};
use crate::resolver::{self, ResolveError};
use crate::util::config::BuildRequest;
use crate::util::diagnostic::Diagnostic;

/// Release assumed when no version is configured.
pub const DEFAULT_VERSION: &str = "5.15.2";

/// A fatal configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ConfigureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Feature(#[from] FeatureError),
}

impl ConfigureError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigureError::Resolve(e) => e.to_diagnostic(),
            ConfigureError::Feature(e) => e.to_diagnostic(),
        }
    }
}

/// Load the catalog named by the request, or the built-in Qt 5 catalog.
pub fn load_catalog(request: &BuildRequest) -> Result<ModuleCatalog> {
    match request.catalog {
        Some(ref path) => ModuleCatalog::load(path),
        None => ModuleCatalog::qt5(),
    }
}

/// Parse the configured release, falling back to [`DEFAULT_VERSION`].
pub fn release(request: &BuildRequest) -> Result<QtRelease> {
    QtRelease::parse(request.version.as_deref().unwrap_or(DEFAULT_VERSION))
}

/// Resolve a build request against a catalog.
///
/// Runs the module closure first, then assembles the configure arguments
/// for the enabled set. An unknown platform is not an error here; it shows
/// up as [`ResolvedBuild::warning`].
pub fn configure(
    catalog: &ModuleCatalog,
    request: &BuildRequest,
) -> Result<ResolvedBuild, ConfigureError> {
    tracing::debug!("configuring for {}", request.target);

    let modules = resolver::resolve(catalog, &request.selection)?;

    let mut builder = PlatformArgsBuilder::new(&request.prefix);
    if let Some(ref library) = request.tls_library {
        builder = builder.tls_library(library.clone());
    }

    let resolved = builder.build(
        &request.target,
        &request.features,
        &modules.enabled,
        catalog,
    )?;

    tracing::info!(
        "Configured {} ({} modules enabled, {} skipped, platform {})",
        request.target,
        modules.enabled.len(),
        modules.skipped.len(),
        resolved.platform_id.as_deref().unwrap_or("unknown"),
    );

    Ok(resolved)
}

/// Package metadata for the request's target and features.
pub fn package_info(request: &BuildRequest) -> Result<PackageInfo> {
    let release = release(request)?;
    Ok(PackageInfo::for_build(
        &release,
        &request.target,
        &request.features,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::{FeatureOptions, GraphicsBackend, ModuleSelection};
    use crate::core::target::{Arch, CompilerFamily};
    use crate::test_support::{catalog, ids, linux, static_features};

    fn request(selection: ModuleSelection, features: FeatureOptions) -> BuildRequest {
        BuildRequest {
            target: linux(CompilerFamily::Gcc, Arch::X86_64),
            features,
            selection,
            ..BuildRequest::default()
        }
    }

    fn scenario() -> ModuleCatalog {
        catalog(&[
            ("base", &[]),
            ("moduleA", &["base"]),
            ("moduleB", &["moduleA"]),
        ])
    }

    #[test]
    fn test_configure_static_module_b() {
        let selection: ModuleSelection = ["moduleB"].into_iter().collect();
        let resolved = configure(&scenario(), &request(selection, static_features())).unwrap();

        assert_eq!(resolved.enabled_modules, ids(&["base", "moduleA", "moduleB"]));
        assert_eq!(resolved.arguments[0], "-static");
        assert!(!resolved.arguments.iter().any(|a| a.starts_with("-skip")));
        assert_eq!(resolved.platform_id.as_deref(), Some("linux-g++"));
    }

    #[test]
    fn test_configure_skips_unrequested() {
        let resolved =
            configure(&scenario(), &request(ModuleSelection::new(), FeatureOptions::default()))
                .unwrap();

        assert_eq!(resolved.enabled_modules, ids(&["base"]));
        assert!(resolved.arguments.contains(&"-skip moduleA".to_string()));
        assert!(resolved.arguments.contains(&"-skip moduleB".to_string()));
    }

    #[test]
    fn test_unknown_module_error() {
        let selection: ModuleSelection = ["moduleZ"].into_iter().collect();
        let err = configure(&scenario(), &request(selection, FeatureOptions::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigureError::Resolve(ResolveError::UnknownModule { ref module, .. }) if module == "moduleZ"
        ));
        assert!(err.to_diagnostic().message.contains("moduleZ"));
    }

    #[test]
    fn test_feature_error_propagates() {
        let features = FeatureOptions {
            graphics: GraphicsBackend::Dynamic,
            ..FeatureOptions::default()
        };
        let err = configure(&scenario(), &request(ModuleSelection::new(), features)).unwrap_err();
        assert!(matches!(err, ConfigureError::Feature(_)));
    }

    #[test]
    fn test_builtin_catalog_and_release() {
        let request = BuildRequest::default();
        let catalog = load_catalog(&request).unwrap();
        assert_eq!(catalog.root().as_str(), "qtbase");
        assert_eq!(release(&request).unwrap().to_string(), DEFAULT_VERSION);
    }
}
