//! Input validation primitives for CLI arguments.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

/// Pick the CLI value when given, otherwise the configured one; either way it
/// must be non-empty.
pub fn resolve_arg(cli: Option<String>, configured: &str, field: &str) -> Result<String> {
    let value = cli.unwrap_or_else(|| configured.to_string());
    let message = format!("{} cannot be empty", field);
    Ok(require_non_empty(&value, field, &message)?.to_string())
}
