/// Data models for feed-service
///
/// This module defines structures for:
/// - Post: social feed entries authored by farmers, customers, or experts
/// - Comment: comments on posts, with one level of replies
/// - PostReport: moderation records flagging a post or comment
use chrono::{DateTime, Utc};
use krishi_common::{AuthorSnapshot, UserType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// Social feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: AuthorSnapshot,
    pub content: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    /// Optional cross-link to a marketplace listing
    pub market_link: Option<Uuid>,
    pub likes: u32,
    pub comment_count: u32,
    pub views: u32,
    /// Set when a moderation report against this post is resolved
    pub hidden: bool,
    pub liked_by: HashSet<Uuid>,
    pub saved_by: HashSet<Uuid>,
    pub posted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Toggle this user's like. Returns true if the post is now liked.
    ///
    /// The `likes` counter tracks the size of `liked_by`, so calling this
    /// twice for the same user restores the original count.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if self.liked_by.remove(&user_id) {
            self.likes = self.likes.saturating_sub(1);
            false
        } else {
            self.liked_by.insert(user_id);
            self.likes += 1;
            true
        }
    }

    /// Toggle this user's save. Returns true if the post is now saved.
    pub fn toggle_save(&mut self, user_id: Uuid) -> bool {
        if self.saved_by.remove(&user_id) {
            false
        } else {
            self.saved_by.insert(user_id);
            true
        }
    }
}

/// Comment on a post, with at most one level of nested replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: AuthorSnapshot,
    pub content: String,
    pub likes: u32,
    pub liked_by: HashSet<Uuid>,
    pub replies: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if self.liked_by.remove(&user_id) {
            self.likes = self.likes.saturating_sub(1);
            false
        } else {
            self.liked_by.insert(user_id);
            self.likes += 1;
            true
        }
    }
}

/// What a moderation report points at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportTarget {
    Post(Uuid),
    Comment(Uuid),
}

impl ReportTarget {
    pub fn id(&self) -> Uuid {
        match self {
            ReportTarget::Post(id) | ReportTarget::Comment(id) => *id,
        }
    }
}

/// Moderation report status.
///
/// Transitions are one-way: `Pending` moves to `Resolved` or `Dismissed`
/// and never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

/// Moderation record flagging a post or comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostReport {
    pub id: Uuid,
    pub target: ReportTarget,
    pub reporter_id: Uuid,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Input payload for creating a post
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Vec<String>,
    #[validate(length(max = 5, message = "at most 5 images"))]
    pub images: Vec<String>,
    pub market_link: Option<Uuid>,
}

/// Partial update for an existing post; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Option<Vec<String>>,
    #[validate(length(max = 5, message = "at most 5 images"))]
    pub images: Option<Vec<String>>,
}

/// Sort order for feed queries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    /// Creation order; creates prepend, so this is the stored order
    #[default]
    Newest,
    Oldest,
    /// Most liked first, ties broken by recency
    Popular,
}

/// Filter for feed queries. `None` means "all" for each criterion.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    /// Case-insensitive substring match against content and tags
    pub search: Option<String>,
    /// Exact tag match (case-insensitive)
    pub tag: Option<String>,
    /// Restrict to posts authored by this kind of user
    pub author_type: Option<UserType>,
    pub sort: FeedSort,
    /// Truncate the result set; `None` returns everything
    pub limit: Option<usize>,
}

impl FeedFilter {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Default::default()
        }
    }
}

pub use krishi_common::models::normalize_tags;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_terminal() {
        assert!(!ReportStatus::Pending.is_terminal());
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Dismissed.is_terminal());
    }

    #[test]
    fn test_post_like_involution() {
        let author = AuthorSnapshot::new(Uuid::new_v4(), "রহিম", "বগুড়া", UserType::Farmer);
        let mut post = Post {
            id: Uuid::new_v4(),
            author,
            content: "test".to_string(),
            tags: vec![],
            images: vec![],
            market_link: None,
            likes: 0,
            comment_count: 0,
            views: 0,
            hidden: false,
            liked_by: HashSet::new(),
            saved_by: HashSet::new(),
            posted_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let user = Uuid::new_v4();
        assert!(post.toggle_like(user));
        assert_eq!(post.likes, 1);
        assert!(!post.toggle_like(user));
        assert_eq!(post.likes, 0);
    }
}
