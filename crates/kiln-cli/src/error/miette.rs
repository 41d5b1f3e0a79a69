//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::{MietteDiagnostic, Report};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    let help = err.hint().map(str::to_string);
    let diagnostic = match &err {
        CliError::Config(config) => config_diagnostic(config),
        _ => MietteDiagnostic::new(err.to_string()),
    };

    match help {
        Some(help) => Report::new(diagnostic.with_help(help)),
        None => Report::new(diagnostic),
    }
}

fn config_diagnostic(err: &ConfigError) -> MietteDiagnostic {
    let code = match err {
        ConfigError::UnknownMode(_) | ConfigError::MissingVariant { .. } => "kiln::mode",
        ConfigError::InvalidAlias { .. } => "kiln::alias",
        ConfigError::InvalidProxy { .. } => "kiln::proxy",
        ConfigError::InvalidPattern { .. } | ConfigError::InvalidTemplate { .. } => "kiln::pattern",
        ConfigError::InvalidPlugin { .. } => "kiln::plugin",
        ConfigError::ResourceNotFound { .. } => "kiln::not_found",
        _ => "kiln::config",
    };
    MietteDiagnostic::new(format!("Configuration error: {err}")).with_code(code)
}
