//! `qtforge configure` command

use anyhow::{Context, Result};

use qtforge::ops;

use crate::cli::ConfigureArgs;

pub fn execute(args: ConfigureArgs) -> Result<()> {
    let request = super::build_request(&args.build)?;
    let catalog = ops::load_catalog(&request)?;

    let resolved = ops::configure(&catalog, &request)?;

    if args.strict && !resolved.has_platform() {
        if let Some(ref warning) = resolved.warning {
            return Err(anyhow::Error::new(warning.clone()))
                .context("--strict requires a platform identifier");
        }
    }

    for var in &resolved.env.unset {
        tracing::debug!("unset {} before configuring", var);
    }
    for dir in &resolved.env.path_prepend {
        tracing::debug!("prepend {} to PATH", dir);
    }
    for dir in &resolved.env.path_remove {
        tracing::debug!("remove {} from PATH", dir);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&resolved)
            .context("failed to serialize configuration")?;
        println!("{}", json);
    } else {
        for arg in &resolved.arguments {
            println!("{}", arg);
        }
    }

    Ok(())
}
