//! Resolve command implementation.
//!
//! Writes the merged, validated configuration for one mode to stdout.

use crate::cli::{OutputFormat, ResolveArgs};
use crate::commands::utils;
use crate::error::Result;
use kiln_config::{BuildConfig, Resolver};
use std::io::Write;
use tracing::info;

/// Execute the resolve command.
///
/// # Errors
///
/// Returns the resolver's error when the config cannot be loaded, merged or
/// validated.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let file = utils::load_config(&args.project, &root)?;

    let mut resolver = Resolver::new(&root).absolute_output(args.absolute_paths);
    if args.schema_only {
        resolver = resolver.schema_only();
    }

    info!(mode = %args.mode, root = %root.display(), "resolving");
    let config = resolver.resolve(&file, args.mode)?;

    let rendered = render(&config, args.format, args.pretty)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Serialize a resolved configuration in the requested format.
pub fn render(config: &BuildConfig, format: OutputFormat, pretty: bool) -> Result<String> {
    let value = config.to_value()?;
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(&value)?,
        OutputFormat::Json => serde_json::to_string(&value)?,
        OutputFormat::Toml => toml::to_string_pretty(&value)?,
    };
    Ok(rendered)
}
