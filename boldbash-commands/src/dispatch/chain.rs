use boldbash_utils::CHAIN_COMBINATOR;

use super::DispatchError;

/// Whether a message body should be treated as a command at all.
///
/// A body starting with the prefix twice ("...well ok then.") is chat.
pub fn is_command(body: &str, prefix: char) -> bool {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(first), second) if first == prefix => second != Some(first),
        _ => false,
    }
}

/// Split a message body into `&&`-separated statements, left to right.
///
/// With `single_statement` only the text before the first combinator is kept.
/// Splitting happens before tokenizing, so a quoted `&&` still splits.
pub fn split_chain(
    body: &str,
    prefix: char,
    single_statement: bool,
) -> Result<Vec<&str>, DispatchError> {
    let stripped = body.strip_prefix(prefix).unwrap_or(body);
    if stripped.trim().is_empty() {
        return Err(DispatchError::EmptyCommand);
    }

    let segments = body.split(CHAIN_COMBINATOR);
    if single_statement {
        Ok(segments.take(1).collect())
    } else {
        Ok(segments.collect())
    }
}
