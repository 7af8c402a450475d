pub mod feed;
pub mod moderation;

pub use feed::FeedService;
pub use moderation::ModerationService;
