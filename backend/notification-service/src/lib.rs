pub mod models;
pub mod repository;
pub mod services;

pub use models::{Notification, NotificationKind};
pub use repository::NotificationStore;
pub use services::NotificationService;
