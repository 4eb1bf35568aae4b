//! Parent checks and placement for new posts.
//!
//! A reply may only hang off an existing post of the same thread. Placement
//! derives the reply's materialized path from its parent so tree listings
//! never need to walk ancestors.

use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use super::{Error, Post, PostDraft, PostId, PostPath, Thread, ThreadId};

/// Reasons a requested parent is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyViolation {
    /// No post carries the requested id.
    #[error("parent post does not exist")]
    MissingParent {
        /// Requested parent id.
        parent: PostId,
    },
    /// The parent lives in another thread.
    #[error("parent post belongs to another thread")]
    ForeignParent {
        /// Requested parent id.
        parent: PostId,
        /// Thread the reply was posted to.
        thread: ThreadId,
    },
}

impl From<HierarchyViolation> for Error {
    fn from(value: HierarchyViolation) -> Self {
        let parent = match value {
            HierarchyViolation::MissingParent { parent }
            | HierarchyViolation::ForeignParent { parent, .. } => parent,
        };
        Error::conflict(value.to_string()).with_details(json!({ "parent": parent.get() }))
    }
}

/// Check the lookup result for a requested parent against the target thread.
///
/// # Examples
/// ```
/// use forum_backend::domain::{HierarchyViolation, PostId, ThreadId, check_parent};
///
/// let missing = check_parent(PostId::new(9), None, ThreadId::new(1));
/// assert_eq!(
///     missing.map(|_| ()),
///     Err(HierarchyViolation::MissingParent { parent: PostId::new(9) })
/// );
/// ```
pub fn check_parent(
    requested: PostId,
    found: Option<&Post>,
    thread: ThreadId,
) -> Result<&Post, HierarchyViolation> {
    let parent = found.ok_or(HierarchyViolation::MissingParent { parent: requested })?;
    if parent.thread != thread {
        return Err(HierarchyViolation::ForeignParent {
            parent: requested,
            thread,
        });
    }
    Ok(parent)
}

/// Everything needed to place one post of a batch.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// Thread receiving the batch.
    pub thread: &'a Thread,
    /// Verified parent, `None` for a root post.
    pub parent: Option<&'a Post>,
    /// Allocated id.
    pub id: PostId,
    /// Timestamp shared by the batch.
    pub created: DateTime<Utc>,
}

/// Build the stored form of a draft.
pub fn place(draft: PostDraft, author: String, placement: Placement<'_>) -> Post {
    let Placement {
        thread,
        parent,
        id,
        created,
    } = placement;
    let path = parent.map_or_else(|| PostPath::root(id), |parent| parent.path.child(id));
    Post {
        id,
        parent: parent.map(|parent| parent.id),
        author,
        message: draft.message,
        is_edited: false,
        forum: thread.forum.clone(),
        thread: thread.id,
        created,
        path,
    }
}
