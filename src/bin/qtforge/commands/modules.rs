//! `qtforge modules` command

use anyhow::Result;

use qtforge::ops;
use qtforge::resolver;

use crate::cli::ModulesArgs;

pub fn execute(args: ModulesArgs) -> Result<()> {
    let request = super::build_request(&args.build)?;
    let catalog = ops::load_catalog(&request)?;

    if args.all {
        for module in catalog.iter() {
            let root = if module.id == *catalog.root() { " (root)" } else { "" };
            println!("{:<24} {}{}", module.id.as_str(), module.status, root);
        }
        return Ok(());
    }

    let resolution = resolver::resolve(&catalog, &request.selection)?;

    println!("enabled:");
    for id in &resolution.enabled {
        println!("  {}", id);
    }

    println!("skipped:");
    for id in &resolution.skipped {
        println!("  {}", id);
    }

    Ok(())
}
