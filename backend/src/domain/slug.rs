//! Slug validation shared by forums and threads.
//!
//! A slug is a trimmed, non-empty run of letters, digits, hyphens, and
//! underscores. Purely numeric slugs are allowed; a numeric thread slug is
//! only reachable through endpoints that take a slug, because the
//! slug-or-id path segment resolves numbers as ids.

use thiserror::Error;

use super::Error;

/// Reasons a slug is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Blank or padded with whitespace.
    #[error("slug must be a non-empty trimmed value")]
    Empty,
    /// Contains something other than letters, digits, `-`, or `_`.
    #[error("slug {slug} may only contain letters, digits, '-' and '_'")]
    InvalidCharacters {
        /// The rejected slug.
        slug: String,
    },
}

impl From<SlugError> for Error {
    fn from(value: SlugError) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// Check `value` against the slug rules.
pub(crate) fn validate_slug(value: &str) -> Result<(), SlugError> {
    if value.is_empty() || value.trim() != value {
        return Err(SlugError::Empty);
    }
    if !value
        .chars()
        .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(SlugError::InvalidCharacters {
            slug: value.to_owned(),
        });
    }
    Ok(())
}
