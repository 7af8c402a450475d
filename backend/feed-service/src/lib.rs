pub mod fixtures;
pub mod models;
pub mod repository;
pub mod services;

pub use models::{Comment, FeedFilter, FeedSort, NewPost, Post, PostReport, ReportStatus, UpdatePost};
pub use repository::FeedStore;
pub use services::{FeedService, ModerationService};
