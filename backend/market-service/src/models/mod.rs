/// Data models for market-service
///
/// A Listing is a marketplace entry (sell/rent/buy/service) with a price
/// in whole taka, a category, and the author snapshot of its seller.
use chrono::{DateTime, Utc};
use krishi_common::AuthorSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// What is being traded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    Crops,
    Seeds,
    Fertilizer,
    Machinery,
    Livestock,
    Service,
}

impl ListingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingCategory::Crops => "crops",
            ListingCategory::Seeds => "seeds",
            ListingCategory::Fertilizer => "fertilizer",
            ListingCategory::Machinery => "machinery",
            ListingCategory::Livestock => "livestock",
            ListingCategory::Service => "service",
        }
    }
}

/// Direction of the trade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Sell,
    Rent,
    Buy,
    Service,
}

/// Listing lifecycle. `Active` listings are visible by default; the only
/// owner-driven transition is `Active -> Sold`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Sold,
    Expired,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Expired => "expired",
        }
    }
}

/// Marketplace listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub author: AuthorSnapshot,
    pub title: String,
    pub description: String,
    pub category: ListingCategory,
    pub kind: ListingKind,
    /// Price in whole taka
    pub price: u64,
    /// Display unit, e.g. "প্রতি মণ"
    pub unit: Option<String>,
    pub location: String,
    pub status: ListingStatus,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub views: u32,
    pub contacts: u32,
    pub saved_by: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Popularity score for the `Popular` sort: contacts weigh double
    /// because they signal buying intent.
    pub fn popularity(&self) -> u32 {
        self.views + 2 * self.contacts
    }

    /// Toggle this user's save. Returns true if the listing is now saved.
    pub fn toggle_save(&mut self, user_id: Uuid) -> bool {
        if self.saved_by.remove(&user_id) {
            false
        } else {
            self.saved_by.insert(user_id);
            true
        }
    }
}

/// Input payload for creating a listing
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewListing {
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub category: ListingCategory,
    pub kind: ListingKind,
    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: u64,
    pub unit: Option<String>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Vec<String>,
    #[validate(length(max = 5, message = "at most 5 images"))]
    pub images: Vec<String>,
}

/// Partial update for a listing; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub category: Option<ListingCategory>,
    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: Option<u64>,
    pub unit: Option<String>,
    pub location: Option<String>,
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Option<Vec<String>>,
    #[validate(length(max = 5, message = "at most 5 images"))]
    pub images: Option<Vec<String>>,
}

/// Sort order for listing queries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingSort {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    Popular,
}

/// Filter for listing queries. `None` means "all" for each criterion.
/// By default only `Active` listings are returned; set
/// `include_all_statuses` (or a specific `status`) to see the rest.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Case-insensitive substring match over title, description, and tags
    pub search: Option<String>,
    pub category: Option<ListingCategory>,
    pub kind: Option<ListingKind>,
    /// Exact location match
    pub location: Option<String>,
    pub status: Option<ListingStatus>,
    pub include_all_statuses: bool,
    pub sort: ListingSort,
    pub limit: Option<usize>,
}

impl ListingFilter {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn category(category: ListingCategory) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_common::UserType;

    fn listing(views: u32, contacts: u32) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            author: AuthorSnapshot::new(Uuid::new_v4(), "করিম", "রংপুর", UserType::Farmer),
            title: "ধান".to_string(),
            description: "ভালো ধান".to_string(),
            category: ListingCategory::Crops,
            kind: ListingKind::Sell,
            price: 1200,
            unit: None,
            location: "রংপুর".to_string(),
            status: ListingStatus::Active,
            tags: vec![],
            images: vec![],
            views,
            contacts,
            saved_by: HashSet::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_popularity_weighs_contacts_double() {
        assert_eq!(listing(10, 0).popularity(), 10);
        assert_eq!(listing(0, 5).popularity(), 10);
    }

    #[test]
    fn test_toggle_save_involution() {
        let mut l = listing(0, 0);
        let user = Uuid::new_v4();
        assert!(l.toggle_save(user));
        assert!(!l.toggle_save(user));
        assert!(l.saved_by.is_empty());
    }
}
