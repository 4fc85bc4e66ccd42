// src/core/input.rs

use crate::core::error::{ResolveError, Result};

/// Trims the raw link and checks it against the length bound.
///
/// Length is counted in characters, so a link full of multi-byte characters
/// is not rejected early.
///
/// # Returns
/// The trimmed link, or `EmptyInput` / `InputTooLong`.
pub fn validate_link(raw: &str, max_len: usize) -> Result<String> {
    let link = raw.trim();
    if link.is_empty() {
        return Err(ResolveError::EmptyInput);
    }
    if link.chars().count() > max_len {
        return Err(ResolveError::InputTooLong { max: max_len });
    }
    Ok(link.to_string())
}

/// Checks a clipboard paste before it is inserted into the input field.
pub fn check_paste(text: &str, max_len: usize) -> Result<()> {
    if text.chars().count() > max_len {
        return Err(ResolveError::InputTooLong { max: max_len });
    }
    Ok(())
}
