//! Discussion threads and the slug-or-id locator used to address them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numeric thread identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ThreadId(i64);

impl ThreadId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Thread {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 42)]
    pub id: ThreadId,
    /// Headline.
    pub title: String,
    /// Canonical author nickname.
    pub author: String,
    /// Canonical forum slug.
    pub forum: String,
    /// Opening message.
    pub message: String,
    /// Sum of all votes cast on the thread.
    #[serde(default)]
    pub votes: i32,
    /// Optional unique slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

/// Thread creation request after author and forum resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    /// Headline.
    pub title: String,
    /// Canonical author nickname.
    pub author: String,
    /// Canonical forum slug.
    pub forum: String,
    /// Opening message.
    pub message: String,
    /// Optional unique slug.
    pub slug: Option<String>,
    /// Creation timestamp, defaulted by the service when absent.
    pub created: DateTime<Utc>,
}

/// Thread fields accepted from a creation request before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDraft {
    /// Headline.
    pub title: String,
    /// Author nickname in any casing.
    pub author: String,
    /// Opening message.
    pub message: String,
    /// Optional slug; an empty string means none.
    pub slug: Option<String>,
    /// Optional explicit creation timestamp.
    pub created: Option<DateTime<Utc>>,
}

/// Partial thread update; absent or empty fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPatch {
    /// Replacement headline.
    pub title: Option<String>,
    /// Replacement message.
    pub message: Option<String>,
}

impl ThreadPatch {
    /// Apply the patch, returning `None` when nothing would change.
    pub fn apply(&self, thread: &Thread) -> Option<Thread> {
        let mut updated = thread.clone();
        if let Some(title) = self.title.as_deref().filter(|title| !title.is_empty()) {
            title.clone_into(&mut updated.title);
        }
        if let Some(message) = self.message.as_deref().filter(|message| !message.is_empty()) {
            message.clone_into(&mut updated.message);
        }
        (updated != *thread).then_some(updated)
    }
}

/// Path segment addressing a thread by numeric id or by slug.
///
/// A segment that parses as an integer is always treated as an id.
///
/// # Examples
/// ```
/// use forum_backend::domain::{ThreadId, ThreadLocator};
///
/// assert_eq!(ThreadLocator::parse("42"), ThreadLocator::Id(ThreadId::new(42)));
/// assert_eq!(
///     ThreadLocator::parse("black-pearl"),
///     ThreadLocator::Slug("black-pearl".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadLocator {
    /// Numeric identifier.
    Id(ThreadId),
    /// Case-insensitive slug.
    Slug(String),
}

impl ThreadLocator {
    /// Classify a raw path segment.
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map_or_else(|_| Self::Slug(raw.to_owned()), |id| Self::Id(ThreadId::new(id)))
    }
}

impl std::fmt::Display for ThreadLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}
