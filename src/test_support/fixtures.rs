//! Test fixtures for common test scenarios.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::features::{FeatureOptions, TlsLibrary};
use crate::core::module::{Module, ModuleId};
use crate::core::target::{Arch, CompilerFamily, TargetDescriptor, TargetOs};
use crate::core::ModuleCatalog;

/// Build a catalog of active modules from `(id, depends)` pairs.
///
/// The first entry is the root.
pub fn catalog(modules: &[(&str, &[&str])]) -> ModuleCatalog {
    let root = modules.first().map(|(id, _)| *id).unwrap_or("qtbase");
    let modules = modules
        .iter()
        .map(|(id, deps)| Module::new(*id).depends_on(deps.iter().copied()))
        .collect();

    ModuleCatalog::new(root, modules).unwrap()
}

/// A set of module ids.
pub fn ids(ids: &[&str]) -> BTreeSet<ModuleId> {
    ids.iter().map(|id| ModuleId::from(*id)).collect()
}

/// Linux target with the given compiler and architecture.
pub fn linux(compiler: CompilerFamily, arch: Arch) -> TargetDescriptor {
    TargetDescriptor::new(TargetOs::Linux, arch, compiler)
}

/// Desktop Windows target built with the given MSVC version.
pub fn msvc(version: &str) -> TargetDescriptor {
    TargetDescriptor::new(TargetOs::Windows, Arch::X86_64, CompilerFamily::Msvc)
        .with_compiler_version(version)
}

/// Default features with static linking.
pub fn static_features() -> FeatureOptions {
    FeatureOptions {
        link: crate::core::LinkMode::Static,
        ..FeatureOptions::default()
    }
}

/// An OpenSSL installation under `/usr`.
pub fn system_openssl() -> TlsLibrary {
    TlsLibrary {
        include_dirs: vec![PathBuf::from("/usr/include/ssl")],
        lib_dirs: vec![PathBuf::from("/usr/lib/ssl")],
        libs: vec!["ssl".to_string(), "crypto".to_string()],
    }
}
