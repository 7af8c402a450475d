/// In-memory storage for the feed service
///
/// `FeedStore` owns the collections behind `parking_lot` locks. It is an
/// explicit object constructed and injected by the caller rather than a
/// module-level singleton, so tests and embedders each get an isolated
/// store. Creates prepend, so the stored order is reverse chronological.
use crate::models::{Comment, Post, PostReport};
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct FeedStore {
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
    reports: RwLock<Vec<PostReport>>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Post operations
    // ============================================

    /// Prepend a new post
    pub fn insert_post(&self, post: Post) {
        self.posts.write().insert(0, post);
    }

    /// Copy of the whole post collection, taken under the read lock.
    ///
    /// Queries filter the copy, so a concurrent mutation can never be
    /// observed mid-filter.
    pub fn snapshot_posts(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    pub fn get_post(&self, id: Uuid) -> Option<Post> {
        self.posts.read().iter().find(|p| p.id == id).cloned()
    }

    /// Run a closure against a post under the write lock.
    /// Returns `None` if the id is absent.
    pub fn with_post_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut Post) -> R) -> Option<R> {
        let mut posts = self.posts.write();
        posts.iter_mut().find(|p| p.id == id).map(f)
    }

    /// Remove a post and all of its comments
    pub fn remove_post(&self, id: Uuid) -> Option<Post> {
        let mut posts = self.posts.write();
        let index = posts.iter().position(|p| p.id == id)?;
        let post = posts.remove(index);
        drop(posts);

        self.comments.write().retain(|c| c.post_id != id);
        Some(post)
    }

    pub fn post_count(&self) -> usize {
        self.posts.read().len()
    }

    // ============================================
    // Comment operations
    // ============================================

    /// Append a top-level comment (comments render oldest first)
    pub fn insert_comment(&self, comment: Comment) {
        self.comments.write().push(comment);
    }

    /// Comments for a post in chronological order
    pub fn comments_for(&self, post_id: Uuid) -> Vec<Comment> {
        self.comments
            .read()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn get_comment(&self, id: Uuid) -> Option<Comment> {
        self.comments.read().iter().find(|c| c.id == id).cloned()
    }

    /// Run a closure against a top-level comment under the write lock
    pub fn with_comment_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut Comment) -> R) -> Option<R> {
        let mut comments = self.comments.write();
        comments.iter_mut().find(|c| c.id == id).map(f)
    }

    /// Remove a top-level comment, returning it (with its replies)
    pub fn remove_comment(&self, id: Uuid) -> Option<Comment> {
        let mut comments = self.comments.write();
        let index = comments.iter().position(|c| c.id == id)?;
        Some(comments.remove(index))
    }

    /// Find the top-level comment holding a reply
    pub fn find_reply_parent(&self, reply_id: Uuid) -> Option<Comment> {
        self.comments
            .read()
            .iter()
            .find(|c| c.replies.iter().any(|r| r.id == reply_id))
            .cloned()
    }

    /// Remove a reply from whichever comment holds it
    pub fn remove_reply(&self, reply_id: Uuid) -> Option<Comment> {
        let mut comments = self.comments.write();
        for parent in comments.iter_mut() {
            if let Some(index) = parent.replies.iter().position(|r| r.id == reply_id) {
                return Some(parent.replies.remove(index));
            }
        }
        None
    }

    // ============================================
    // Report operations
    // ============================================

    pub fn insert_report(&self, report: PostReport) {
        self.reports.write().insert(0, report);
    }

    pub fn snapshot_reports(&self) -> Vec<PostReport> {
        self.reports.read().clone()
    }

    pub fn with_report_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut PostReport) -> R) -> Option<R> {
        let mut reports = self.reports.write();
        reports.iter_mut().find(|r| r.id == id).map(f)
    }

    /// True if this reporter already has a pending report for the target
    pub fn has_pending_report(&self, reporter_id: Uuid, target_id: Uuid) -> bool {
        self.reports.read().iter().any(|r| {
            r.reporter_id == reporter_id
                && r.target.id() == target_id
                && !r.status.is_terminal()
        })
    }
}
