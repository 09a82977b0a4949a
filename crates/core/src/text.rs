//! Input validation and display sanitising for user-supplied text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of a channel name, in characters.
pub const MAX_CHANNEL_NAME_LEN: usize = 20;

/// Maximum length of a channel description, in characters.
pub const MAX_CHANNEL_DESCRIPTION_LEN: usize = 5000;

/// Maximum length of a comment, in characters.
pub const MAX_COMMENT_LEN: usize = 500;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Validate a channel name: non-empty after trimming, at most 20 characters.
pub fn validate_channel_name(name: &str) -> Result<(), CoreError> {
    validate_length("Channel name", name.trim(), 1, MAX_CHANNEL_NAME_LEN)
}

pub fn validate_channel_description(description: &str) -> Result<(), CoreError> {
    validate_length("Channel description", description, 0, MAX_CHANNEL_DESCRIPTION_LEN)
}

/// Validate comment text: non-empty after trimming, at most 500 characters.
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    validate_length("Comment", text.trim(), 1, MAX_COMMENT_LEN)
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Normalise an email address by lower-casing its domain part.
///
/// The local part is kept as entered since mail servers may treat it as
/// case-sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate that `email` looks like an address and `password_hash` is present.
pub fn validate_credentials(email: &str, password_hash: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() || password_hash.is_empty() {
        return Err(CoreError::Validation(
            "Users must have email and password".into(),
        ));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Escape markup so stored text renders literally.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn channel_name_limits() {
        assert!(validate_channel_name("gamer").is_ok());
        assert!(validate_channel_name(&"n".repeat(MAX_CHANNEL_NAME_LEN)).is_ok());
        assert_matches!(validate_channel_name("  "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_channel_name(&"n".repeat(MAX_CHANNEL_NAME_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn channel_description_may_be_empty() {
        assert!(validate_channel_description("").is_ok());
        assert!(validate_channel_description(&"d".repeat(MAX_CHANNEL_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn comment_limits_count_characters_not_bytes() {
        assert!(validate_comment_text(&"é".repeat(MAX_COMMENT_LEN)).is_ok());
        assert_matches!(validate_comment_text(""), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_comment_text(&"é".repeat(MAX_COMMENT_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "Alice@example.com");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn credentials_require_both_fields() {
        assert!(validate_credentials("a@b.io", "hash").is_ok());
        assert_matches!(validate_credentials("", "hash"), Err(CoreError::Validation(_)));
        assert_matches!(validate_credentials("a@b.io", ""), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_credentials("not-an-email", "hash"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_markup("<b>hi</b> & \"bye\""),
            "&lt;b&gt;hi&lt;/b&gt; &amp; &quot;bye&quot;"
        );
        assert_eq!(escape_markup("plain"), "plain");
    }
}
