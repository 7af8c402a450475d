pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::{AuthorSnapshot, UserType};
