//! Nickname extraction from user-supplied link input.
//!
//! Link commands accept either a bare FACEIT nickname or a profile URL
//! pasted from the browser. Mentions arrive with a leading `@`.

use crate::domain::foundation::ValidationError;

/// Extracts the FACEIT nickname from raw link input.
///
/// Accepted forms:
/// - `s1mple` or `@s1mple`
/// - `https://faceit.com/en/players/s1mple`
/// - `https://www.faceit.com/players/s1mple` (and `/player/` variant)
///
/// Trailing path segments and query strings on URLs are ignored.
pub fn extract_nickname(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("nickname"));
    }

    let after_scheme = match trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return Ok(trimmed.to_string()),
    };

    let rest = after_scheme.strip_prefix("www.").unwrap_or(after_scheme);
    let rest = rest
        .strip_prefix("faceit.com/")
        .ok_or_else(|| ValidationError::invalid_format("nickname", "not a faceit.com link"))?;
    let rest = rest.strip_prefix("en/").unwrap_or(rest);
    let rest = rest
        .strip_prefix("players/")
        .or_else(|| rest.strip_prefix("player/"))
        .ok_or_else(|| {
            ValidationError::invalid_format("nickname", "link is not a player profile")
        })?;

    let nickname = rest.split(['/', '?']).next().unwrap_or("");
    if nickname.is_empty() {
        return Err(ValidationError::invalid_format(
            "nickname",
            "profile link has no nickname",
        ));
    }
    Ok(nickname.to_string())
}
