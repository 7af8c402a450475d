/// Feed service - post creation, querying, comments, and engagement
use crate::models::{
    normalize_tags, Comment, FeedFilter, FeedSort, NewPost, Post, UpdatePost,
};
use crate::repository::FeedStore;
use chrono::Utc;
use krishi_common::{AuthorSnapshot, Config, StoreError, StoreResult};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct FeedService {
    store: Arc<FeedStore>,
    config: Config,
}

impl FeedService {
    pub fn new(store: Arc<FeedStore>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    pub fn with_config(store: Arc<FeedStore>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<FeedStore> {
        &self.store
    }

    // ============================================
    // Post CRUD
    // ============================================

    /// Create a new post. The post is prepended, so an unfiltered query
    /// returns it first.
    pub fn create_post(&self, new: NewPost, author: AuthorSnapshot) -> StoreResult<Post> {
        new.validate()?;
        self.check_content_len(&new.content)?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author,
            content: new.content,
            tags: normalize_tags(&new.tags),
            images: new.images,
            market_link: new.market_link,
            likes: 0,
            comment_count: 0,
            views: 0,
            hidden: false,
            liked_by: HashSet::new(),
            saved_by: HashSet::new(),
            posted_at: now,
            updated_at: now,
        };

        tracing::info!(post_id = %post.id, author = %post.author.user_id, "post created");
        self.store.insert_post(post.clone());
        Ok(post)
    }

    /// Query the feed. Takes a snapshot of the collection, applies one
    /// predicate pass per active criterion, then a single sort pass.
    /// Hidden (moderated) posts are never returned. No match yields an
    /// empty vec, never an error.
    pub fn get_posts(&self, filter: &FeedFilter) -> Vec<Post> {
        let mut posts = self.store.snapshot_posts();
        posts.retain(|p| !p.hidden);

        if let Some(query) = &filter.search {
            let needle = query.to_lowercase();
            posts.retain(|p| {
                p.content.to_lowercase().contains(&needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            });
        }

        if let Some(tag) = &filter.tag {
            let tag = tag.to_lowercase();
            posts.retain(|p| p.tags.iter().any(|t| t.to_lowercase() == tag));
        }

        if let Some(author_type) = filter.author_type {
            posts.retain(|p| p.author.user_type == author_type);
        }

        match filter.sort {
            // Creates prepend, so the snapshot is already newest first.
            FeedSort::Newest => {}
            FeedSort::Oldest => posts.sort_by(|a, b| a.posted_at.cmp(&b.posted_at)),
            FeedSort::Popular => {
                posts.sort_by(|a, b| b.likes.cmp(&a.likes).then(b.posted_at.cmp(&a.posted_at)))
            }
        }

        if let Some(limit) = filter.limit {
            posts.truncate(limit);
        }

        tracing::debug!(results = posts.len(), "feed query");
        posts
    }

    /// First page of the unfiltered feed
    pub fn recent(&self) -> Vec<Post> {
        self.get_posts(&FeedFilter {
            limit: Some(self.config.default_page_size),
            ..Default::default()
        })
    }

    pub fn get_post(&self, id: Uuid) -> Option<Post> {
        self.store.get_post(id).filter(|p| !p.hidden)
    }

    /// Merge a patch into a post. Only the author may edit.
    pub fn update_post(&self, id: Uuid, patch: UpdatePost, acting_user: Uuid) -> StoreResult<Post> {
        patch.validate()?;
        if let Some(content) = &patch.content {
            self.check_content_len(content)?;
        }

        let result = self.store.with_post_mut(id, |post| {
            if post.author.user_id != acting_user {
                return Err(StoreError::forbidden("only the author can edit a post"));
            }
            if let Some(content) = patch.content {
                post.content = content;
            }
            if let Some(tags) = patch.tags {
                post.tags = normalize_tags(&tags);
            }
            if let Some(images) = patch.images {
                post.images = images;
            }
            post.updated_at = Utc::now();
            Ok(post.clone())
        });

        match result {
            None => Err(StoreError::not_found("post", id)),
            Some(Ok(post)) => {
                tracing::info!(post_id = %id, "post updated");
                Ok(post)
            }
            Some(err) => err,
        }
    }

    /// Delete a post and its comments. Only the author may delete.
    pub fn delete_post(&self, id: Uuid, acting_user: Uuid) -> StoreResult<()> {
        let post = self
            .store
            .get_post(id)
            .ok_or_else(|| StoreError::not_found("post", id))?;
        if post.author.user_id != acting_user {
            return Err(StoreError::forbidden("only the author can delete a post"));
        }

        self.store.remove_post(id);
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }

    // ============================================
    // Engagement
    // ============================================

    /// Toggle the acting user's like. Returns true if the post is now
    /// liked. Toggling twice restores the original count.
    pub fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        self.store
            .with_post_mut(post_id, |post| post.toggle_like(user_id))
            .ok_or_else(|| StoreError::not_found("post", post_id))
    }

    /// Toggle the acting user's save. Returns true if the post is now saved.
    pub fn toggle_save(&self, post_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        self.store
            .with_post_mut(post_id, |post| post.toggle_save(user_id))
            .ok_or_else(|| StoreError::not_found("post", post_id))
    }

    /// Unconditional view counter bump; there is deliberately no dedup.
    /// Returns the new count.
    pub fn record_view(&self, post_id: Uuid) -> StoreResult<u32> {
        self.store
            .with_post_mut(post_id, |post| {
                post.views += 1;
                post.views
            })
            .ok_or_else(|| StoreError::not_found("post", post_id))
    }

    /// Posts the user has saved, newest first
    pub fn saved_posts(&self, user_id: Uuid) -> Vec<Post> {
        let mut posts = self.store.snapshot_posts();
        posts.retain(|p| !p.hidden && p.saved_by.contains(&user_id));
        posts
    }

    // ============================================
    // Comments
    // ============================================

    /// Add a top-level comment to a post
    pub fn add_comment(
        &self,
        post_id: Uuid,
        content: impl Into<String>,
        author: AuthorSnapshot,
    ) -> StoreResult<Comment> {
        let comment = self.build_comment(post_id, content.into(), author)?;

        self.store
            .with_post_mut(post_id, |post| post.comment_count += 1)
            .ok_or_else(|| StoreError::not_found("post", post_id))?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment added");
        self.store.insert_comment(comment.clone());
        Ok(comment)
    }

    /// Add a reply under a top-level comment. Replies nest one level only:
    /// replying to a reply is rejected.
    pub fn add_reply(
        &self,
        parent_id: Uuid,
        content: impl Into<String>,
        author: AuthorSnapshot,
    ) -> StoreResult<Comment> {
        let parent = self
            .store
            .get_comment(parent_id)
            .ok_or_else(|| StoreError::not_found("comment", parent_id))?;

        let reply = self.build_comment(parent.post_id, content.into(), author)?;

        self.store
            .with_comment_mut(parent_id, |c| c.replies.push(reply.clone()))
            .ok_or_else(|| StoreError::not_found("comment", parent_id))?;
        self.store
            .with_post_mut(parent.post_id, |post| post.comment_count += 1);

        tracing::info!(reply_id = %reply.id, parent_id = %parent_id, "reply added");
        Ok(reply)
    }

    /// Comments for a post in chronological order
    pub fn get_comments(&self, post_id: Uuid) -> Vec<Comment> {
        self.store.comments_for(post_id)
    }

    pub fn toggle_comment_like(&self, comment_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        if let Some(liked) = self
            .store
            .with_comment_mut(comment_id, |c| c.toggle_like(user_id))
        {
            return Ok(liked);
        }
        Err(StoreError::not_found("comment", comment_id))
    }

    /// Delete a comment or reply. The comment author and the post author
    /// may both delete.
    pub fn delete_comment(&self, comment_id: Uuid, acting_user: Uuid) -> StoreResult<()> {
        if let Some(comment) = self.store.get_comment(comment_id) {
            self.check_comment_delete(&comment, acting_user)?;
            let removed = self
                .store
                .remove_comment(comment_id)
                .ok_or_else(|| StoreError::not_found("comment", comment_id))?;
            let removed_total = 1 + removed.replies.len() as u32;
            self.store.with_post_mut(removed.post_id, |post| {
                post.comment_count = post.comment_count.saturating_sub(removed_total);
            });
            tracing::info!(comment_id = %comment_id, "comment deleted");
            return Ok(());
        }

        if let Some(parent) = self.store.find_reply_parent(comment_id) {
            let reply = parent
                .replies
                .iter()
                .find(|r| r.id == comment_id)
                .cloned()
                .ok_or_else(|| StoreError::not_found("comment", comment_id))?;
            self.check_comment_delete(&reply, acting_user)?;
            self.store.remove_reply(comment_id);
            self.store.with_post_mut(parent.post_id, |post| {
                post.comment_count = post.comment_count.saturating_sub(1);
            });
            tracing::info!(reply_id = %comment_id, "reply deleted");
            return Ok(());
        }

        Err(StoreError::not_found("comment", comment_id))
    }

    // ============================================
    // Helpers
    // ============================================

    fn build_comment(
        &self,
        post_id: Uuid,
        content: String,
        author: AuthorSnapshot,
    ) -> StoreResult<Comment> {
        if content.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "comment content must not be empty".to_string(),
            ));
        }
        self.check_content_len(&content)?;

        Ok(Comment {
            id: Uuid::new_v4(),
            post_id,
            author,
            content,
            likes: 0,
            liked_by: HashSet::new(),
            replies: Vec::new(),
            created_at: Utc::now(),
        })
    }

    fn check_comment_delete(&self, comment: &Comment, acting_user: Uuid) -> StoreResult<()> {
        if comment.author.user_id == acting_user {
            return Ok(());
        }
        let post_owner = self
            .store
            .get_post(comment.post_id)
            .map(|p| p.author.user_id);
        if post_owner == Some(acting_user) {
            return Ok(());
        }
        Err(StoreError::forbidden(
            "only the comment author or the post author can delete a comment",
        ))
    }

    fn check_content_len(&self, content: &str) -> StoreResult<()> {
        if content.chars().count() > self.config.max_content_len {
            return Err(StoreError::InvalidInput(format!(
                "content exceeds {} characters",
                self.config.max_content_len
            )));
        }
        Ok(())
    }
}
