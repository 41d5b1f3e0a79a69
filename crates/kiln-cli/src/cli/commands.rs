use clap::{Args, Subcommand};
use kiln_config::Mode;
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_mode;

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration for one mode
    ///
    /// Merges the variant for --mode onto the base configuration, validates
    /// it and writes the result to stdout.
    Resolve(ResolveArgs),

    /// Resolve every declared variant and report problems
    Check(CheckArgs),

    /// Show which file a module request resolves to
    ///
    /// Applies the aliases, lookup roots and extension order of the
    /// resolved configuration.
    Lookup(LookupArgs),
}

/// Where to find the project and its configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Path to the configuration file
    ///
    /// Defaults to kiln.toml, kiln.json or the "kiln" field of package.json
    /// in the project root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Apply KILN_* environment variables on top of the file
    ///
    /// Nested keys are separated by "__", e.g. KILN_OUTPUT__PATH=build.
    #[arg(long)]
    pub env_overrides: bool,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Mode to resolve (development or production)
    #[arg(
        short,
        long,
        env = "NODE_ENV",
        default_value = "production",
        value_parser = parse_mode
    )]
    pub mode: Mode,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Skip checks that entries and templates exist on disk
    #[arg(long)]
    pub schema_only: bool,

    /// Print output.path as an absolute path
    #[arg(long)]
    pub absolute_paths: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Skip checks that entries and templates exist on disk
    #[arg(long)]
    pub schema_only: bool,
}

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Module request, e.g. "react-native" or "./src/App"
    #[arg(value_name = "REQUEST")]
    pub request: String,

    /// Mode whose resolve settings are used
    #[arg(
        short,
        long,
        env = "NODE_ENV",
        default_value = "production",
        value_parser = parse_mode
    )]
    pub mode: Mode,

    /// Directory of the importing module (defaults to the project root)
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    #[command(flatten)]
    pub project: ProjectArgs,
}
