//! Forums and their denormalized counters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::{SlugError, validate_slug};

/// Stored forum with its thread and post counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Forum {
    /// Display title.
    #[schema(example = "Pirate stories")]
    pub title: String,
    /// Owner nickname in canonical casing.
    #[schema(example = "jack.sparrow")]
    pub user: String,
    /// Unique slug in canonical casing.
    #[schema(example = "pirate-stories")]
    pub slug: String,
    /// Number of posts across all threads.
    #[serde(default)]
    pub posts: i64,
    /// Number of threads.
    #[serde(default)]
    pub threads: i64,
}

/// Forum registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumDraft {
    /// Display title.
    pub title: String,
    /// Requested slug.
    pub slug: String,
    /// Owner nickname in any casing.
    pub user: String,
}

impl ForumDraft {
    /// Check the requested slug.
    pub fn validate(&self) -> Result<(), SlugError> {
        validate_slug(&self.slug)
    }

    /// Build an empty forum owned by the resolved `owner`.
    pub fn into_forum(self, owner: String) -> Forum {
        Forum {
            title: self.title,
            user: owner,
            slug: self.slug,
            posts: 0,
            threads: 0,
        }
    }
}
