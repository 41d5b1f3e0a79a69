//! Check command implementation.
//!
//! Resolves every declared variant and reports each result.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;
use kiln_config::Resolver;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the configuration file
/// 2. Merge and validate each declared variant
/// 3. Check entries and plugin templates exist (unless `--schema-only`)
///
/// # Errors
///
/// Returns `CliError::CheckFailed` when any variant fails.
pub fn execute(args: CheckArgs) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let file = utils::load_config(&args.project, &root)?;

    ui::info("Checking configuration...");

    let mut resolver = Resolver::new(&root);
    if args.schema_only {
        resolver = resolver.schema_only();
    }

    let results = resolver.resolve_all(&file);
    if results.is_empty() {
        ui::warning("No variants declared; add [variants.development] or [variants.production]");
        return Ok(());
    }

    let total = results.len();
    let mut failed = 0;
    for (mode, result) in results {
        match result {
            Ok(config) => {
                ui::success(&format!(
                    "{mode}: {} entry chunks, {} rules, {} plugins",
                    config.entry.len(),
                    config.module.rules.len(),
                    config.plugins.len()
                ));
            }
            Err(err) => {
                failed += 1;
                ui::error(&format!("{mode}: {err}"));
                if let Some(hint) = err.hint() {
                    ui::detail(&format!("Hint: {hint}"));
                }
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed { failed, total });
    }

    ui::success("All variants resolved!");
    Ok(())
}
