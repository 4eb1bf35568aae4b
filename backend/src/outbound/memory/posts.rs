//! `PostRepository` over the in-process state.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{PostRepository, StoreError};
use crate::domain::{Post, PostId, PostSort, ThreadId, materialize};

use super::MemoryStore;

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let state = self.lock()?;
        Ok(state.posts.get(&id).cloned())
    }

    async fn insert_batch(&self, posts: &[Post]) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        // Validate the whole batch before touching any state.
        for post in posts {
            if state.posts.contains_key(&post.id) {
                return Err(StoreError::duplicate(format!("post {} already exists", post.id)));
            }
            if !state.forums.iter().any(|forum| forum.slug == post.forum) {
                return Err(StoreError::query(format!("forum {} is not stored", post.forum)));
            }
        }

        for post in posts {
            state.forum_mut(&post.forum)?.posts += 1;
            state.join(&post.forum, &post.author);
            state.posts.insert(post.id, post.clone());
        }
        Ok(())
    }

    async fn list(
        &self,
        thread: ThreadId,
        sort: PostSort,
        page: &PageRequest<Post>,
    ) -> Result<Vec<Post>, StoreError> {
        let posts: Vec<Post> = {
            let state = self.lock()?;
            state
                .posts
                .values()
                .filter(|post| post.thread == thread)
                .cloned()
                .collect()
        };
        Ok(materialize(posts, sort, page))
    }

    async fn update_message(
        &self,
        id: PostId,
        message: &str,
    ) -> Result<Option<Post>, StoreError> {
        let mut state = self.lock()?;
        let Some(post) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        message.clone_into(&mut post.message);
        post.is_edited = true;
        Ok(Some(post.clone()))
    }
}
