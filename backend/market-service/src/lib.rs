pub mod fixtures;
pub mod models;
pub mod repository;
pub mod services;

pub use models::{
    Listing, ListingCategory, ListingFilter, ListingKind, ListingSort, ListingStatus, NewListing,
    UpdateListing,
};
pub use repository::MarketStore;
pub use services::MarketService;
