//! Command implementations

pub mod completions;
pub mod configure;
pub mod modules;
pub mod package_info;
pub mod platform;
pub mod source;

use std::path::Path;

use anyhow::{Context, Result};

use qtforge::util::config::{
    global_config_path, load_config, project_config_path, BuildRequest, Config,
};
use qtforge::util::diagnostic::suggestions;

use crate::cli::BuildArgs;

/// Merge the global config with the project config, or with `explicit`
/// when one was passed on the command line.
pub fn load_layers(explicit: Option<&Path>) -> Result<Config> {
    let global = global_config_path().unwrap_or_default();

    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "config file {} does not exist\n{}",
                    path.display(),
                    suggestions::NO_CONFIG
                );
            }
            let mut config = Config::load_or_default(&global);
            config.merge(Config::load(path)?);
            Ok(config)
        }
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(load_config(&global, &project_config_path(&cwd)))
        }
    }
}

/// Configuration layers plus command-line flags, with defaults applied.
pub fn build_request(args: &BuildArgs) -> Result<BuildRequest> {
    let mut config = load_layers(args.config.as_deref())?;
    config.merge(args.to_config());

    let request = config.to_request();
    tracing::debug!("target {}, prefix {}", request.target, request.prefix.display());

    Ok(request)
}
