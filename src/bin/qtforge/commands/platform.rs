//! `qtforge platform` command

use anyhow::{Context, Result};

use qtforge::builder::platform_id;
use qtforge::util::diagnostic::suggestions;
use qtforge::util::Config;

use crate::cli::PlatformArgs;

pub fn execute(args: PlatformArgs) -> Result<()> {
    let mut config = super::load_layers(args.config.as_deref())?;
    config.merge(Config {
        target: args.target.to_config(),
        ..Config::default()
    });

    let target = config.target();
    let id = platform_id(&target)
        .map_err(anyhow::Error::new)
        .with_context(|| format!("cannot derive a platform\n{}", suggestions::NO_PLATFORM))?;

    println!("{}", id);

    Ok(())
}
