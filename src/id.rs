//! Sequential id allocation.
//!
//! Ids look like `PREFIX-N`. Only ids with the configured prefix and an
//! all-digit suffix take part in numbering; anything else in the file is left
//! alone and never collides with a generated id.

use crate::error::{Error, Result};

/// Sequence number of `id` under `prefix`, if it follows the `PREFIX-N` shape.
pub fn parse_sequence(prefix: &str, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next free id: one past the highest existing sequence, or `PREFIX-1`.
pub fn next_id<'a, I>(prefix: &str, existing: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| parse_sequence(prefix, id))
        .max()
        .unwrap_or(0);
    let next = max
        .checked_add(1)
        .ok_or_else(|| Error::IdExhausted(prefix.to_string()))?;
    Ok(format!("{prefix}-{next}"))
}
