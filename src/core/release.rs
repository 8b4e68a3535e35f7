//! Qt release identity and source archive location.
//!
//! Only the *names* are computed here. Downloading and verifying the
//! archive is the fetcher's job.

use std::fmt;

use anyhow::{Context, Result};
use semver::Version;
use url::Url;

use crate::core::target::TargetOs;

const OFFICIAL_RELEASES: &str = "https://download.qt.io/official_releases/qt";
const ARCHIVE: &str = "http://download.qt.io/archive/qt";

/// A Qt release, e.g. `5.9.3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QtRelease {
    version: Version,
}

impl QtRelease {
    /// Parse a release version.
    pub fn parse(s: &str) -> Result<Self> {
        let version = Version::parse(s.trim())
            .with_context(|| format!("invalid Qt version `{}`", s))?;
        Ok(QtRelease { version })
    }

    /// Major version, used in library names (`Qt5Core`).
    pub fn major(&self) -> u64 {
        self.version.major
    }

    /// `major.minor`, the name of the release series directory.
    pub fn series(&self) -> String {
        format!("{}.{}", self.version.major, self.version.minor)
    }

    /// Name of the top-level directory inside the source archive.
    pub fn source_dir_name(&self) -> String {
        format!("qt-everywhere-opensource-src-{}", self.version)
    }

    /// Archive format published for a host OS.
    pub fn archive_extension(os: TargetOs) -> &'static str {
        match os {
            TargetOs::Linux => "tar.xz",
            _ => "zip",
        }
    }

    /// File name of the source archive.
    pub fn archive_name(&self, os: TargetOs) -> String {
        format!("{}.{}", self.source_dir_name(), Self::archive_extension(os))
    }

    /// Download location of the single-archive source distribution.
    ///
    /// Series from `x.9` on are still listed under `official_releases`;
    /// older ones have moved to the archive mirror.
    pub fn source_url(&self, os: TargetOs) -> Result<Url> {
        let base = if self.version.minor >= 9 {
            OFFICIAL_RELEASES
        } else {
            ARCHIVE
        };

        let url = format!(
            "{}/{}/{}/single/{}",
            base,
            self.series(),
            self.version,
            self.archive_name(os)
        );

        Url::parse(&url).with_context(|| format!("invalid source URL `{}`", url))
    }
}

impl fmt::Display for QtRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
