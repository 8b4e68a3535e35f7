//! qtforge CLI - resolve Qt module sets and configure arguments

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qtforge::builder::errors::FeatureError;
use qtforge::builder::UnsupportedPlatform;
use qtforge::ops::ConfigureError;
use qtforge::resolver::ResolveError;
use qtforge::util::diagnostic::{self, Severity};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("qtforge=debug")
    } else {
        EnvFilter::new("qtforge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args),
        Commands::Modules(args) => commands::modules::execute(args),
        Commands::Platform(args) => commands::platform::execute(args),
        Commands::PackageInfo(args) => commands::package_info::execute(args),
        Commands::Source(args) => commands::source::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error, as a diagnostic when it is one of ours.
fn report(err: &anyhow::Error, color: bool) {
    let diag = if let Some(e) = err.downcast_ref::<ConfigureError>() {
        e.to_diagnostic()
    } else if let Some(e) = err.downcast_ref::<ResolveError>() {
        e.to_diagnostic()
    } else if let Some(e) = err.downcast_ref::<FeatureError>() {
        e.to_diagnostic()
    } else if let Some(e) = err.downcast_ref::<UnsupportedPlatform>() {
        // fatal here, whatever the library thinks
        let mut diag = e.to_diagnostic();
        diag.severity = Severity::Error;
        diag.with_context(format!("{:#}", err))
    } else {
        eprintln!("error: {:#}", err);
        return;
    };

    diagnostic::emit(&diag, color);
}
