//! Command-line interface definition for Kiln.
//!
//! # Command Structure
//!
//! - `kiln resolve` - Print the merged configuration for one mode
//! - `kiln check` - Resolve every declared variant and report problems
//! - `kiln lookup` - Show which file a module request resolves to

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, LookupArgs, ProjectArgs, ResolveArgs};
pub use enums::*;
pub use validation::parse_mode;

/// Kiln - mode-aware bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Resolve bundler configuration for development or production",
    long_about = "Kiln merges a development or production variant onto a shared base\n\
                  configuration and prints the validated result for a build engine."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
