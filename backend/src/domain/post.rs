//! Posts, their materialized tree paths, and post detail projections.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use pagination::Direction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::{Error, Forum, Thread, ThreadId, User};

/// Numeric post identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ancestor chain of a post, root first and ending with the post itself.
///
/// Ascending tree order is the lexicographic order of paths: a parent sorts
/// before its subtree and siblings sort by id. Descending tree order reverses
/// sibling order at every level while still listing a parent before its
/// children, which equals the ascending order of [`PostPath::descending_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostPath(Vec<i64>);

impl PostPath {
    /// Path of a root post.
    pub fn root(id: PostId) -> Self {
        Self(vec![id.get()])
    }

    /// Path of a reply to the post owning `self`.
    pub fn child(&self, id: PostId) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(id.get());
        Self(segments)
    }

    /// Rebuild a path loaded from storage.
    pub fn from_segments(segments: Vec<i64>) -> Self {
        Self(segments)
    }

    /// Raw ancestor ids.
    pub fn segments(&self) -> &[i64] {
        &self.0
    }

    /// Id of the root post heading this subtree.
    pub fn root_id(&self) -> Option<PostId> {
        self.0.first().copied().map(PostId::new)
    }

    /// Key whose ascending order is descending tree order.
    pub fn descending_key(&self) -> Vec<i64> {
        self.0.iter().map(|segment| -segment).collect()
    }

    /// Compare two paths in tree order for the given direction.
    pub fn tree_cmp(&self, other: &Self, direction: Direction) -> Ordering {
        for (left, right) in self.0.iter().zip(&other.0) {
            match left.cmp(right) {
                Ordering::Equal => {}
                unequal => return direction.orient(unequal),
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

/// Stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: PostId,
    /// Parent post id; serialized as `0` for root posts.
    #[serde(
        default,
        serialize_with = "serialize_parent",
        deserialize_with = "deserialize_parent"
    )]
    #[schema(value_type = i64, example = 0)]
    pub parent: Option<PostId>,
    /// Canonical author nickname.
    pub author: String,
    /// Message body.
    pub message: String,
    /// Set once the message has been changed.
    #[serde(default)]
    pub is_edited: bool,
    /// Canonical forum slug.
    pub forum: String,
    /// Owning thread.
    #[schema(value_type = i64)]
    pub thread: ThreadId,
    /// Creation timestamp shared by every post of a batch.
    pub created: DateTime<Utc>,
    /// Materialized ancestor chain.
    #[serde(skip)]
    pub path: PostPath,
}

fn serialize_parent<S>(parent: &Option<PostId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(parent.map_or(0, PostId::get))
}

fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<PostId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0).map(PostId::new))
}

/// One entry of a batch creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Author nickname in any casing.
    pub author: String,
    /// Message body.
    pub message: String,
    /// Parent post, `None` for a new root.
    pub parent: Option<PostId>,
}

/// Message edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    /// Replacement message; absent or empty keeps the stored one.
    pub message: Option<String>,
}

impl PostPatch {
    /// New message to store, or `None` when the edit changes nothing.
    pub fn changed_message(&self, post: &Post) -> Option<String> {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty() && *message != post.message)
            .map(str::to_owned)
    }
}

/// Related entities that can be attached to post details.
///
/// # Examples
/// ```
/// use forum_backend::domain::Related;
///
/// let related = Related::parse("user,thread").expect("known names");
/// assert!(related.user && related.thread && !related.forum);
/// assert!(Related::parse("user,captain").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Related {
    /// Attach the author.
    pub user: bool,
    /// Attach the forum.
    pub forum: bool,
    /// Attach the thread.
    pub thread: bool,
}

impl Related {
    /// Parse the comma-separated `related` query value.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut related = Self::default();
        for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            match name {
                "user" => related.user = true,
                "forum" => related.forum = true,
                "thread" => related.thread = true,
                other => {
                    return Err(Error::invalid_request(format!(
                        "unknown related entity {other}; expected user, forum or thread"
                    )));
                }
            }
        }
        Ok(related)
    }
}

/// A post together with the related entities requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostDetails {
    /// The post itself.
    pub post: Post,
    /// Author, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Forum, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
    /// Thread, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn path(segments: &[i64]) -> PostPath {
        PostPath::from_segments(segments.to_vec())
    }

    #[rstest]
    fn child_extends_parent_path() {
        let root = PostPath::root(PostId::new(3));
        let reply = root.child(PostId::new(8));
        assert_eq!(reply.segments(), &[3, 8]);
        assert_eq!(reply.root_id(), Some(PostId::new(3)));
    }

    #[rstest]
    #[case(&[1], &[1, 2], Direction::Ascending, Ordering::Less)]
    #[case(&[1], &[1, 2], Direction::Descending, Ordering::Less)]
    #[case(&[1, 2], &[1, 3], Direction::Ascending, Ordering::Less)]
    #[case(&[1, 2], &[1, 3], Direction::Descending, Ordering::Greater)]
    #[case(&[1, 2, 9], &[1, 3], Direction::Ascending, Ordering::Less)]
    #[case(&[2], &[1, 3], Direction::Descending, Ordering::Less)]
    fn tree_cmp_orders_parents_before_children(
        #[case] left: &[i64],
        #[case] right: &[i64],
        #[case] direction: Direction,
        #[case] expected: Ordering,
    ) {
        assert_eq!(path(left).tree_cmp(&path(right), direction), expected);
    }

    #[rstest]
    #[case(&[1], &[1, 2])]
    #[case(&[1, 3], &[1, 2])]
    #[case(&[2], &[1, 3])]
    fn descending_key_matches_descending_tree_order(#[case] left: &[i64], #[case] right: &[i64]) {
        let by_key = path(left).descending_key().cmp(&path(right).descending_key());
        assert_eq!(by_key, path(left).tree_cmp(&path(right), Direction::Descending));
    }

    #[rstest]
    fn root_parent_serializes_as_zero() {
        let post = Post {
            id: PostId::new(1),
            parent: None,
            author: "jack".to_owned(),
            message: "Ahoy".to_owned(),
            is_edited: false,
            forum: "pirates".to_owned(),
            thread: ThreadId::new(1),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid time"),
            path: PostPath::root(PostId::new(1)),
        };
        let value = serde_json::to_value(&post).expect("serialize post");
        assert_eq!(value["parent"], json!(0));
        assert_eq!(value["isEdited"], json!(false));
        assert!(value.get("path").is_none());

        let decoded: Post = serde_json::from_value(value).expect("deserialize post");
        assert_eq!(decoded.parent, None);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("Ahoy"), None)]
    #[case(Some("Avast"), Some("Avast"))]
    fn patch_reports_only_real_changes(#[case] message: Option<&str>, #[case] expected: Option<&str>) {
        let post = Post {
            id: PostId::new(2),
            parent: None,
            author: "jack".to_owned(),
            message: "Ahoy".to_owned(),
            is_edited: false,
            forum: "pirates".to_owned(),
            thread: ThreadId::new(1),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid time"),
            path: PostPath::root(PostId::new(2)),
        };
        let patch = PostPatch {
            message: message.map(str::to_owned),
        };
        assert_eq!(patch.changed_message(&post).as_deref(), expected);
    }

    #[rstest]
    #[case("", Related::default())]
    #[case("forum", Related { forum: true, ..Related::default() })]
    #[case("user,forum,thread", Related { user: true, forum: true, thread: true })]
    fn related_parses_known_names(#[case] raw: &str, #[case] expected: Related) {
        assert_eq!(Related::parse(raw).expect("known names"), expected);
    }
}
