//! Forum users.
//!
//! Nicknames and emails are stored with the caller's casing but every lookup
//! and uniqueness check ignores case.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::Error;

/// Validation errors raised while registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Nickname is blank.
    #[error("nickname must not be empty")]
    EmptyNickname,
    /// Nickname contains a character outside `[A-Za-z0-9_.]`.
    #[error("nickname {nickname} may only contain latin letters, digits, '_' and '.'")]
    InvalidNickname {
        /// The rejected nickname.
        nickname: String,
    },
    /// Email is blank.
    #[error("email must not be empty")]
    EmptyEmail,
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// Validated nickname with its original casing.
///
/// # Examples
/// ```
/// use forum_backend::domain::Nickname;
///
/// let nickname = Nickname::new("Jack.Sparrow").expect("valid nickname");
/// assert!(nickname.matches("jack.sparrow"));
/// assert!(Nickname::new("jack sparrow").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// Validate a raw nickname.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let nickname = raw.into();
        if nickname.is_empty() {
            return Err(UserValidationError::EmptyNickname);
        }
        if !nickname
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.')
        {
            return Err(UserValidationError::InvalidNickname { nickname });
        }
        Ok(Self(nickname))
    }

    /// Borrow the nickname.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison with another spelling.
    pub fn matches(&self, other: &str) -> bool {
        fold_case(&self.0) == fold_case(other)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

/// Case-folded key used for case-insensitive identity comparisons.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique handle in its canonical casing.
    #[schema(example = "jack.sparrow")]
    pub nickname: String,
    /// Display name.
    #[schema(example = "Captain Jack Sparrow")]
    pub fullname: String,
    /// Free-form description.
    #[serde(default)]
    pub about: String,
    /// Unique contact address.
    #[schema(example = "captain@blackpearl.sea")]
    pub email: String,
}

/// Profile fields supplied when registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name.
    pub fullname: String,
    /// Free-form description.
    pub about: String,
    /// Unique contact address.
    pub email: String,
}

impl User {
    /// Assemble a user from a validated nickname and profile.
    pub fn register(nickname: Nickname, profile: UserProfile) -> Result<Self, UserValidationError> {
        if profile.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self {
            nickname: nickname.into(),
            fullname: profile.fullname,
            about: profile.about,
            email: profile.email,
        })
    }
}

/// Partial profile update.
///
/// Absent or empty fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement display name.
    pub fullname: Option<String>,
    /// Replacement description.
    pub about: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
}

impl UserPatch {
    /// Apply the patch, returning `None` when nothing would change.
    pub fn apply(&self, user: &User) -> Option<User> {
        let mut updated = user.clone();
        replace_if_present(&mut updated.fullname, self.fullname.as_deref());
        replace_if_present(&mut updated.about, self.about.as_deref());
        replace_if_present(&mut updated.email, self.email.as_deref());
        (updated != *user).then_some(updated)
    }
}

fn replace_if_present(field: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        value.clone_into(field);
    }
}
