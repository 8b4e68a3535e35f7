//! Target descriptors.
//!
//! A target descriptor names the environment the library is built for:
//! operating system, CPU architecture and compiler. It is the key into the
//! platform table (see [`crate::builder::platform`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown OS, architecture, compiler or
/// option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        ParseEnumError {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetOs {
    Linux,
    Macos,
    Windows,
    Android,
    Ios,
    Tvos,
    Watchos,
    Freebsd,
    Solaris,
    WindowsStore,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
            TargetOs::Windows => "windows",
            TargetOs::Android => "android",
            TargetOs::Ios => "ios",
            TargetOs::Tvos => "tvos",
            TargetOs::Watchos => "watchos",
            TargetOs::Freebsd => "freebsd",
            TargetOs::Solaris => "solaris",
            TargetOs::WindowsStore => "windows-store",
        }
    }

    /// Desktop Windows or the Windows Store (UWP) runtime.
    pub fn is_windows_family(&self) -> bool {
        matches!(self, TargetOs::Windows | TargetOs::WindowsStore)
    }

    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "macos" => TargetOs::Macos,
            "windows" => TargetOs::Windows,
            "android" => TargetOs::Android,
            "ios" => TargetOs::Ios,
            "freebsd" => TargetOs::Freebsd,
            "solaris" | "illumos" => TargetOs::Solaris,
            _ => TargetOs::Linux,
        }
    }
}

impl FromStr for TargetOs {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "macos" | "darwin" | "osx" => Ok(TargetOs::Macos),
            "windows" | "win32" => Ok(TargetOs::Windows),
            "android" => Ok(TargetOs::Android),
            "ios" => Ok(TargetOs::Ios),
            "tvos" => Ok(TargetOs::Tvos),
            "watchos" => Ok(TargetOs::Watchos),
            "freebsd" => Ok(TargetOs::Freebsd),
            "solaris" | "sunos" => Ok(TargetOs::Solaris),
            "windows-store" | "windowsstore" | "winrt" => Ok(TargetOs::WindowsStore),
            _ => Err(ParseEnumError::new(
                "operating system",
                s,
                "linux, macos, windows, android, ios, tvos, watchos, freebsd, solaris, windows-store",
            )),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X86_64,
    Armv6,
    Armv7,
    Armv8,
    Mips,
    Mips64,
    Sparc,
    Sparcv9,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv6 => "armv6",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
            Arch::Mips => "mips",
            Arch::Mips64 => "mips64",
            Arch::Sparc => "sparc",
            Arch::Sparcv9 => "sparcv9",
        }
    }

    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "aarch64" => Arch::Armv8,
            "arm" => Arch::Armv7,
            "mips" => Arch::Mips,
            "mips64" => Arch::Mips64,
            "sparc" => Arch::Sparc,
            "sparc64" => Arch::Sparcv9,
            _ => Arch::X86_64,
        }
    }
}

impl FromStr for Arch {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "x86_64" | "x86-64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "armv6" => Ok(Arch::Armv6),
            "armv7" | "armv7hf" => Ok(Arch::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Arch::Armv8),
            "mips" => Ok(Arch::Mips),
            "mips64" => Ok(Arch::Mips64),
            "sparc" => Ok(Arch::Sparc),
            "sparcv9" | "sparc64" => Ok(Arch::Sparcv9),
            _ => Err(ParseEnumError::new(
                "architecture",
                s,
                "x86, x86_64, armv6, armv7, armv8, mips, mips64, sparc, sparcv9",
            )),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    Gcc,
    #[serde(alias = "apple-clang")]
    Clang,
    #[serde(alias = "visual-studio")]
    Msvc,
    SunCc,
}

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::SunCc => "sun-cc",
        }
    }

    /// The compiler a target OS is normally built with.
    pub fn default_for(os: TargetOs) -> Self {
        match os {
            TargetOs::Windows | TargetOs::WindowsStore => CompilerFamily::Msvc,
            TargetOs::Solaris => CompilerFamily::SunCc,
            TargetOs::Linux => CompilerFamily::Gcc,
            _ => CompilerFamily::Clang,
        }
    }
}

impl FromStr for CompilerFamily {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" | "g++" | "mingw" => Ok(CompilerFamily::Gcc),
            "clang" | "apple-clang" => Ok(CompilerFamily::Clang),
            "msvc" | "visual studio" | "visual-studio" | "vs" => Ok(CompilerFamily::Msvc),
            "sun-cc" | "suncc" => Ok(CompilerFamily::SunCc),
            _ => Err(ParseEnumError::new("compiler", s, "gcc, clang, msvc, sun-cc")),
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The environment a build is configured for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub os: TargetOs,
    pub arch: Arch,
    pub compiler: CompilerFamily,
    /// Free-form version token; only consulted for msvc targets
    pub compiler_version: Option<String>,
    /// Build against libc++ instead of libstdc++ (clang only)
    pub libcxx: bool,
}

impl TargetDescriptor {
    pub fn new(os: TargetOs, arch: Arch, compiler: CompilerFamily) -> Self {
        TargetDescriptor {
            os,
            arch,
            compiler,
            compiler_version: None,
            libcxx: false,
        }
    }

    /// Set the compiler version token.
    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    /// Select libc++ as the C++ standard library.
    pub fn with_libcxx(mut self, libcxx: bool) -> Self {
        self.libcxx = libcxx;
        self
    }

    /// Descriptor for the machine we are running on.
    pub fn host() -> Self {
        let os = TargetOs::host();
        TargetDescriptor::new(os, Arch::host(), CompilerFamily::default_for(os))
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.os, self.arch, self.compiler)?;
        if let Some(ref version) = self.compiler_version {
            write!(f, "-{}", version)?;
        }
        if self.libcxx {
            write!(f, " (libc++)")?;
        }
        Ok(())
    }
}
