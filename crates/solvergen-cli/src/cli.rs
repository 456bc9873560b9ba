use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Solvergen Developers",
    version,
    about = "Solvergen CLI - Generates standalone, compilable solver servers for parametric optimization problems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a solver project from a problem file and build it.
    Generate(GenerateArgs),
    /// Print one generated artifact to stdout without touching the filesystem.
    Preview(PreviewArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Stop after the sources are written; do not run the final build.
    #[arg(long)]
    pub skip_build: bool,
}

/// Arguments for the `preview` subcommand.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Which artifact to print.
    #[arg(value_enum)]
    pub artifact: Artifact,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The solver server entry point (`src/main.rs`).
    Main,
    /// The package manifest (`Cargo.toml`).
    Manifest,
    /// The C configuration header of the support library.
    Header,
}

/// Problem file and the overrides shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the problem description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the build directory; the project lands in `<DIR>/<name>`.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override the project name from the problem file.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Override `build.mode` from the problem file.
    #[command(flatten)]
    pub build_mode: BuildModeFlags,

    /// Override the compilation target (a triple, an alias such as 'rpi', or 'default').
    #[arg(long, value_name = "TARGET")]
    pub target: Option<String>,

    /// Set a specific configuration value, overriding the problem file.
    /// Can be used multiple times. Example: -S solver.tolerance=1e-6
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive build mode flags.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct BuildModeFlags {
    /// Build the generated project in release mode.
    #[arg(long)]
    pub release: bool,
    /// Build the generated project in debug mode.
    #[arg(long)]
    pub debug: bool,
}
