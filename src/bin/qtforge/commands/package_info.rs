//! `qtforge package-info` command

use anyhow::{Context, Result};

use qtforge::ops;

use crate::cli::PackageInfoArgs;

pub fn execute(args: PackageInfoArgs) -> Result<()> {
    let request = super::build_request(&args.build)?;
    let info = ops::package_info(&request)?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .context("failed to serialize package info")?;
        println!("{}", json);
        return Ok(());
    }

    println!("libs:");
    for lib in &info.libs {
        println!("  {}", lib);
    }

    println!("include dirs:");
    for dir in &info.include_dirs {
        println!("  {}", dir);
    }

    if !info.bin_dirs.is_empty() {
        println!("bin dirs:");
        for dir in &info.bin_dirs {
            println!("  {}", dir);
        }
    }

    Ok(())
}
