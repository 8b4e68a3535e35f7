//! Platform identifier lookup.
//!
//! Maps a target descriptor to the name of the mkspec the configure script
//! should use (`linux-g++`, `win32-msvc2017`, ...). The mapping is a nested
//! table: OS, then compiler, then a rule keyed on architecture and/or
//! compiler version. Adding a combination means adding a table row.

use std::fmt;

use serde::Serialize;

use crate::core::target::{Arch, CompilerFamily, TargetDescriptor, TargetOs};
use crate::util::diagnostic::Diagnostic;

/// How the identifier is picked once OS and compiler matched.
#[derive(Debug)]
enum Rule {
    /// One identifier for every architecture
    Fixed(&'static str),
    /// Keyed on architecture
    ByArch(&'static [(Arch, &'static str)]),
    /// Keyed on architecture: (arch, libstdc++ id, libc++ id)
    ByArchLibcxx(&'static [(Arch, &'static str, &'static str)]),
    /// Keyed on compiler version
    ByVersion(&'static [(&'static str, &'static str)]),
    /// Keyed on compiler version, then architecture
    ByVersionArch(&'static [(&'static str, &'static [(Arch, &'static str)])]),
}

type CompilerRules = &'static [(CompilerFamily, Rule)];

static PLATFORM_TABLE: &[(TargetOs, CompilerRules)] = &[
    (
        TargetOs::Linux,
        &[
            (
                CompilerFamily::Gcc,
                Rule::ByArch(&[
                    (Arch::X86, "linux-g++-32"),
                    (Arch::X86_64, "linux-g++"),
                    (Arch::Armv6, "linux-arm-gnueabi-g++"),
                    (Arch::Armv7, "linux-arm-gnueabi-g++"),
                    (Arch::Armv8, "linux-aarch64-gnu-g++"),
                ]),
            ),
            (
                CompilerFamily::Clang,
                Rule::ByArchLibcxx(&[
                    (Arch::X86, "linux-clang-32", "linux-clang-libc++-32"),
                    (Arch::X86_64, "linux-clang", "linux-clang-libc++"),
                ]),
            ),
        ],
    ),
    (
        TargetOs::Macos,
        &[
            (
                CompilerFamily::Clang,
                Rule::ByArch(&[
                    (Arch::X86, "macx-clang-32"),
                    (Arch::X86_64, "macx-clang"),
                    (Arch::Armv8, "macx-clang"),
                ]),
            ),
            (CompilerFamily::Gcc, Rule::Fixed("macx-g++")),
        ],
    ),
    (
        TargetOs::Ios,
        &[(CompilerFamily::Clang, Rule::Fixed("macx-ios-clang"))],
    ),
    (
        TargetOs::Tvos,
        &[(CompilerFamily::Clang, Rule::Fixed("macx-tvos-clang"))],
    ),
    (
        TargetOs::Watchos,
        &[(CompilerFamily::Clang, Rule::Fixed("macx-watchos-clang"))],
    ),
    (
        TargetOs::Android,
        &[
            (CompilerFamily::Clang, Rule::Fixed("android-clang")),
            (CompilerFamily::Gcc, Rule::Fixed("android-g++")),
        ],
    ),
    (
        TargetOs::Windows,
        &[
            (
                CompilerFamily::Msvc,
                Rule::ByVersion(&[
                    ("10", "win32-msvc2010"),
                    ("11", "win32-msvc2012"),
                    ("12", "win32-msvc2013"),
                    ("14", "win32-msvc2015"),
                    ("15", "win32-msvc2017"),
                    ("16", "win32-msvc2019"),
                ]),
            ),
            (CompilerFamily::Gcc, Rule::Fixed("win32-g++")),
            (CompilerFamily::Clang, Rule::Fixed("win32-clang-g++")),
        ],
    ),
    (
        TargetOs::WindowsStore,
        &[(
            CompilerFamily::Msvc,
            Rule::ByVersionArch(&[
                (
                    "14",
                    &[
                        (Arch::Armv7, "winrt-arm-msvc2015"),
                        (Arch::X86, "winrt-x86-msvc2015"),
                        (Arch::X86_64, "winrt-x64-msvc2015"),
                    ],
                ),
                (
                    "15",
                    &[
                        (Arch::Armv7, "winrt-arm-msvc2017"),
                        (Arch::X86, "winrt-x86-msvc2017"),
                        (Arch::X86_64, "winrt-x64-msvc2017"),
                    ],
                ),
                (
                    "16",
                    &[
                        (Arch::Armv7, "winrt-arm-msvc2019"),
                        (Arch::X86, "winrt-x86-msvc2019"),
                        (Arch::X86_64, "winrt-x64-msvc2019"),
                    ],
                ),
            ]),
        )],
    ),
    (
        TargetOs::Freebsd,
        &[
            (CompilerFamily::Clang, Rule::Fixed("freebsd-clang")),
            (CompilerFamily::Gcc, Rule::Fixed("freebsd-g++")),
        ],
    ),
    (
        TargetOs::Solaris,
        &[
            (
                CompilerFamily::SunCc,
                Rule::ByArch(&[(Arch::Sparc, "solaris-cc"), (Arch::Sparcv9, "solaris-cc64")]),
            ),
            (
                CompilerFamily::Gcc,
                Rule::ByArch(&[(Arch::Sparc, "solaris-g++"), (Arch::Sparcv9, "solaris-g++-64")]),
            ),
        ],
    ),
];

/// The platform identifier could not be derived.
///
/// This is a warning: the argument list is still usable without a
/// `-platform` flag and the caller decides whether to go on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedPlatform {
    /// The descriptor that was looked up
    pub target: String,
    /// Which key had no entry
    pub reason: String,
}

impl UnsupportedPlatform {
    fn new(target: &TargetDescriptor, reason: String) -> Self {
        UnsupportedPlatform {
            target: target.to_string(),
            reason,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(format!("no platform identifier for `{}`", self.target))
            .with_context(self.reason.clone())
            .with_suggestion(
                "The configure script will pick its default mkspec; pass `-platform <spec>` as an extra argument to override",
            )
    }
}

impl fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported platform `{}`: {}", self.target, self.reason)
    }
}

impl std::error::Error for UnsupportedPlatform {}

/// Map common spellings of MSVC versions onto the toolset major version.
fn normalize_msvc_version(version: &str) -> &str {
    match version.trim() {
        "2010" | "160" => "10",
        "2012" | "170" => "11",
        "2013" | "180" => "12",
        "2015" | "190" => "14",
        "2017" | "191" => "15",
        "2019" | "192" => "16",
        other => other,
    }
}

fn lookup<K: PartialEq + Copy, V: Copy>(rows: &[(K, V)], key: K) -> Option<V> {
    rows.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn lookup_version<V: Copy>(rows: &[(&'static str, V)], version: &str) -> Option<V> {
    rows.iter().find(|(v, _)| *v == version).map(|(_, id)| *id)
}

/// Derive the platform identifier of a target.
pub fn platform_id(target: &TargetDescriptor) -> Result<&'static str, UnsupportedPlatform> {
    let unsupported = |reason: String| UnsupportedPlatform::new(target, reason);

    let compilers = lookup(PLATFORM_TABLE, target.os).ok_or_else(|| {
        unsupported(format!("no platforms are known for {}", target.os))
    })?;

    let rule = compilers
        .iter()
        .find(|(compiler, _)| *compiler == target.compiler)
        .map(|(_, rule)| rule)
        .ok_or_else(|| {
            unsupported(format!(
                "compiler {} is not supported on {}",
                target.compiler, target.os
            ))
        })?;

    let arch_unsupported = || {
        unsupported(format!(
            "architecture {} is not supported by {} on {}",
            target.arch, target.compiler, target.os
        ))
    };

    let version = || {
        target
            .compiler_version
            .as_deref()
            .map(normalize_msvc_version)
            .ok_or_else(|| {
                unsupported(format!(
                    "{} on {} requires a compiler version",
                    target.compiler, target.os
                ))
            })
    };

    let version_unsupported = |v: &str| {
        unsupported(format!(
            "{} version `{}` is not supported on {}",
            target.compiler, v, target.os
        ))
    };

    match *rule {
        Rule::Fixed(id) => Ok(id),
        Rule::ByArch(rows) => lookup(rows, target.arch).ok_or_else(arch_unsupported),
        Rule::ByArchLibcxx(rows) => rows
            .iter()
            .find(|(arch, _, _)| *arch == target.arch)
            .map(|&(_, libstdcxx, libcxx)| if target.libcxx { libcxx } else { libstdcxx })
            .ok_or_else(arch_unsupported),
        Rule::ByVersion(rows) => {
            let v = version()?;
            lookup_version(rows, v).ok_or_else(|| version_unsupported(v))
        }
        Rule::ByVersionArch(rows) => {
            let v = version()?;
            let arches = lookup_version(rows, v).ok_or_else(|| version_unsupported(v))?;
            lookup(arches, target.arch).ok_or_else(arch_unsupported)
        }
    }
}
