//! Metadata published with the built package.
//!
//! Downstream build systems need to know which libraries to link and where
//! the headers live. Names follow the installed layout of a Qt build:
//! `Qt5Core`, `Qt5Cored` (Windows debug), `Qt5Core_debug` (macOS debug).

use serde::Serialize;

use crate::core::features::FeatureOptions;
use crate::core::release::QtRelease;
use crate::core::target::{TargetDescriptor, TargetOs};

/// Libraries every build installs.
const BASE_LIBS: &[&str] = &["Core", "Concurrent", "Network", "Sql", "Test", "Xml"];

/// Link and include information for consumers of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Library names to link, without prefix or extension
    pub libs: Vec<String>,
    /// Include directories relative to the package root
    pub include_dirs: Vec<String>,
    /// Directories relative to the package root to add to the runtime path
    pub bin_dirs: Vec<String>,
}

impl PackageInfo {
    /// Compute the metadata for a build.
    pub fn for_build(
        release: &QtRelease,
        target: &TargetDescriptor,
        features: &FeatureOptions,
    ) -> Self {
        let mut components: Vec<&str> = BASE_LIBS.to_vec();

        if target.os == TargetOs::Linux {
            components.push("DBus");
        }
        if features.gui {
            components.push("Gui");
            components.push("OpenGL");
        }
        if features.widgets {
            components.push("Widgets");
        }

        let suffix = match target.os {
            TargetOs::Windows if features.variant.is_debug() => "d",
            TargetOs::Macos if features.variant.is_debug() => "_debug",
            _ => "",
        };

        let mut include_dirs = vec!["include".to_string()];
        include_dirs.extend(components.iter().map(|c| format!("include/Qt{}", c)));

        let libs = components
            .iter()
            .map(|c| format!("Qt{}{}{}", release.major(), c, suffix))
            .collect();

        let bin_dirs = if target.os.is_windows_family() {
            vec!["bin".to_string()]
        } else {
            Vec::new()
        };

        PackageInfo {
            libs,
            include_dirs,
            bin_dirs,
        }
    }
}
