use kiln_config::Mode;

/// Parse a `--mode` / `NODE_ENV` value.
///
/// Only `development` and `production` are accepted (case-insensitive).
/// Anything else, such as `staging` or `test`, is rejected rather than
/// silently mapped to a default.
///
/// # Errors
///
/// Returns the resolver's own message for an unknown mode.
pub fn parse_mode(s: &str) -> Result<Mode, String> {
    if s.trim().is_empty() {
        return Err("Mode cannot be empty".to_string());
    }

    s.parse::<Mode>().map_err(|err| err.to_string())
}
