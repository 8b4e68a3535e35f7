//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use qtforge::core::{
    Arch, BuildVariant, CompilerFamily, GraphicsBackend, LinkMode, TargetOs, TlsBackend,
};
use qtforge::util::config::{Config, FeaturesConfig, TargetConfig};

/// qtforge - resolve Qt module sets and configure arguments
#[derive(Parser)]
#[command(name = "qtforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the configure arguments for a build
    Configure(ConfigureArgs),

    /// Show which modules are enabled and skipped
    Modules(ModulesArgs),

    /// Show the platform identifier of a target
    Platform(PlatformArgs),

    /// Show the libraries and include directories of a build
    PackageInfo(PackageInfoArgs),

    /// Show the source archive URL of a release
    Source(SourceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target selection flags shared by every command that resolves a target.
#[derive(Args, Clone, Default)]
pub struct TargetArgs {
    /// Target operating system
    #[arg(long)]
    pub os: Option<TargetOs>,

    /// Target architecture
    #[arg(long)]
    pub arch: Option<Arch>,

    /// Compiler family
    #[arg(long)]
    pub compiler: Option<CompilerFamily>,

    /// Compiler version (e.g. 15 or 2017 for msvc)
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Build against libc++ (clang only)
    #[arg(long, conflicts_with = "no_libcxx")]
    pub libcxx: bool,

    /// Build against libstdc++, overriding a configured `libcxx = true`
    #[arg(long)]
    pub no_libcxx: bool,
}

impl TargetArgs {
    pub fn to_config(&self) -> TargetConfig {
        TargetConfig {
            os: self.os,
            arch: self.arch,
            compiler: self.compiler,
            compiler_version: self.compiler_version.clone(),
            libcxx: match (self.libcxx, self.no_libcxx) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

/// Build option flags. They override `qtforge.toml` and the global config.
#[derive(Args, Clone, Default)]
pub struct BuildArgs {
    /// Configuration file to use instead of ./qtforge.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Module catalog (TOML); defaults to the built-in Qt 5 catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Installation prefix
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Qt release
    #[arg(long = "qt-version")]
    pub qt_version: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Link mode
    #[arg(long, conflicts_with = "static_link")]
    pub link: Option<LinkMode>,

    /// Build static libraries (same as --link static)
    #[arg(long = "static")]
    pub static_link: bool,

    /// OpenGL backend
    #[arg(long)]
    pub graphics: Option<GraphicsBackend>,

    /// OpenSSL integration
    #[arg(long)]
    pub tls: Option<TlsBackend>,

    /// Build without the GUI module
    #[arg(long)]
    pub no_gui: bool,

    /// Build without the widgets module
    #[arg(long)]
    pub no_widgets: bool,

    /// Build variant
    #[arg(long)]
    pub variant: Option<BuildVariant>,

    /// Request a module (repeatable)
    #[arg(short, long = "module", value_name = "ID")]
    pub modules: Vec<String>,

    /// Extra configure argument, appended verbatim (repeatable)
    #[arg(long = "extra", value_name = "ARG", allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl BuildArgs {
    /// The flags as a configuration layer.
    pub fn to_config(&self) -> Config {
        let link = if self.static_link {
            Some(LinkMode::Static)
        } else {
            self.link
        };

        let mut config = Config {
            prefix: self.prefix.clone(),
            catalog: self.catalog.clone(),
            version: self.qt_version.clone(),
            target: self.target.to_config(),
            features: FeaturesConfig {
                link,
                graphics: self.graphics,
                tls: self.tls,
                gui: self.no_gui.then_some(false),
                widgets: self.no_widgets.then_some(false),
                variant: self.variant,
                extra: self.extra.clone(),
            },
            ..Config::default()
        };

        for module in &self.modules {
            config.modules.request(module.as_str());
        }

        config
    }
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Print the whole resolved build as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail when no platform identifier is known for the target
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// List every module of the catalog with its status
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct PlatformArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Configuration file to read the target from
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct PackageInfoArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Qt release
    #[arg(long = "version", value_name = "VERSION")]
    pub qt_version: Option<String>,

    /// Operating system the archive is for (defaults to the host)
    #[arg(long)]
    pub os: Option<TargetOs>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
