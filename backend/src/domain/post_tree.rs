//! Ordering of a thread's posts for the three listing modes.
//!
//! - `flat`: by `(created, id)`; the page starts strictly after the `since`
//!   post.
//! - `tree`: depth-first by materialized path; the page starts strictly after
//!   the `since` post's path.
//! - `parent_tree`: pages over root posts by id, each root followed by its
//!   whole subtree in ascending tree order; the page starts after the root of
//!   the `since` post.
//!
//! [`materialize`] applies these rules in memory. Storage adapters with a
//! query language push the same rules down and must agree with it.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use pagination::{Bound, Direction, PageRequest};

use super::{Error, Post, PostId};

/// Requested ordering of a thread's posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PostSort {
    /// Chronological.
    #[default]
    Flat,
    /// Depth-first over the whole thread.
    Tree,
    /// Paged by root post, subtrees inlined.
    ParentTree,
}

impl PostSort {
    /// Query-string spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
            Self::ParentTree => "parent_tree",
        }
    }
}

impl FromStr for PostSort {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "flat" => Ok(Self::Flat),
            "tree" => Ok(Self::Tree),
            "parent_tree" => Ok(Self::ParentTree),
            other => Err(Error::invalid_request(format!(
                "unknown sort {other}; expected flat, tree or parent_tree"
            ))),
        }
    }
}

/// Post listing request: a sort mode and a page bounded by a post id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListing {
    /// Ordering mode.
    pub sort: PostSort,
    /// Page whose `since` boundary is a post id.
    pub page: PageRequest<PostId>,
}

/// Order and page every post of one thread.
///
/// `page.since()` is the resolved boundary post, if any.
pub fn materialize(posts: Vec<Post>, sort: PostSort, page: &PageRequest<Post>) -> Vec<Post> {
    match sort {
        PostSort::Flat => flat(posts, page),
        PostSort::Tree => tree(posts, page),
        PostSort::ParentTree => parent_tree(posts, page),
    }
}

fn flat(mut posts: Vec<Post>, page: &PageRequest<Post>) -> Vec<Post> {
    let direction = page.direction();
    posts.sort_by(|left, right| direction.orient(flat_cmp(left, right)));
    page.take(posts.into_iter().filter(|post| {
        page.since()
            .is_none_or(|since| direction.admits(flat_cmp(post, since), Bound::Exclusive))
    }))
}

fn flat_cmp(left: &Post, right: &Post) -> Ordering {
    (left.created, left.id).cmp(&(right.created, right.id))
}

fn tree(mut posts: Vec<Post>, page: &PageRequest<Post>) -> Vec<Post> {
    let direction = page.direction();
    posts.sort_by(|left, right| left.path.tree_cmp(&right.path, direction));
    page.take(posts.into_iter().filter(|post| {
        page.since().is_none_or(|since| {
            post.path.tree_cmp(&since.path, direction) == Ordering::Greater
        })
    }))
}

fn parent_tree(posts: Vec<Post>, page: &PageRequest<Post>) -> Vec<Post> {
    let direction = page.direction();
    let boundary = page.since().and_then(|since| since.path.root_id());

    let mut subtrees: HashMap<PostId, Vec<Post>> = HashMap::new();
    for post in posts {
        if let Some(root) = post.path.root_id() {
            subtrees.entry(root).or_default().push(post);
        }
    }

    let mut roots: Vec<PostId> = subtrees
        .keys()
        .copied()
        .filter(|root| {
            boundary.is_none_or(|boundary| direction.admits(root.cmp(&boundary), Bound::Exclusive))
        })
        .collect();
    roots.sort_by(|left, right| direction.orient(left.cmp(right)));

    page.take(roots)
        .into_iter()
        .filter_map(|root| subtrees.remove(&root))
        .flat_map(|mut subtree| {
            subtree.sort_by(|left, right| left.path.tree_cmp(&right.path, Direction::Ascending));
            subtree
        })
        .collect()
}
