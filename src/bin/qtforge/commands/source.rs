//! `qtforge source` command

use anyhow::Result;

use qtforge::core::{QtRelease, TargetOs};
use qtforge::ops::configure::DEFAULT_VERSION;

use crate::cli::SourceArgs;

pub fn execute(args: SourceArgs) -> Result<()> {
    let release = QtRelease::parse(args.qt_version.as_deref().unwrap_or(DEFAULT_VERSION))?;
    let os = args.os.unwrap_or_else(TargetOs::host);

    println!("{}", release.source_url(os)?);

    Ok(())
}
