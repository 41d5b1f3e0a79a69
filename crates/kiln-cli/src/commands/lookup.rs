//! Lookup command implementation.
//!
//! Prints the file a module request resolves to under one mode's settings.

use crate::cli::LookupArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use kiln_config::{ModuleResolver, Resolver};
use std::io::Write;
use tracing::debug;

/// Execute the lookup command.
///
/// Entries are not checked on disk here; only the request itself must
/// resolve.
pub fn execute(args: LookupArgs) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let file = utils::load_config(&args.project, &root)?;
    let config = Resolver::new(&root).schema_only().resolve(&file, args.mode)?;

    let importer = match &args.from {
        Some(dir) => utils::resolve_path(dir, &root),
        None => root.clone(),
    };
    if !importer.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--from {} is not a directory",
            importer.display()
        )));
    }
    debug!(request = %args.request, importer = %importer.display(), "looking up module");

    let found = ModuleResolver::new(&config.resolve, &root).resolve_from(&args.request, &importer)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", found.display())?;
    Ok(())
}
