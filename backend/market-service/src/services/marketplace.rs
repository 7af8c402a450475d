/// Marketplace service - listing CRUD, the filter/sort pipeline, and
/// engagement counters
use crate::models::{
    Listing, ListingFilter, ListingSort, ListingStatus, NewListing, UpdateListing,
};
use crate::repository::MarketStore;
use chrono::Utc;
use krishi_common::models::normalize_tags;
use krishi_common::{AuthorSnapshot, Config, StoreError, StoreResult};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct MarketService {
    store: Arc<MarketStore>,
    config: Config,
}

impl MarketService {
    pub fn new(store: Arc<MarketStore>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    pub fn with_config(store: Arc<MarketStore>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<MarketStore> {
        &self.store
    }

    // ============================================
    // Listing CRUD
    // ============================================

    /// Create a listing. New listings start `Active` and are prepended,
    /// so an unfiltered query returns the newest first.
    pub fn create_listing(&self, new: NewListing, author: AuthorSnapshot) -> StoreResult<Listing> {
        new.validate()?;
        self.check_description_len(&new.description)?;

        let now = Utc::now();
        let listing = Listing {
            id: Uuid::new_v4(),
            author,
            title: new.title,
            description: new.description,
            category: new.category,
            kind: new.kind,
            price: new.price,
            unit: new.unit,
            location: new.location,
            status: ListingStatus::Active,
            tags: normalize_tags(&new.tags),
            images: new.images,
            views: 0,
            contacts: 0,
            saved_by: HashSet::new(),
            created_at: now,
            updated_at: now,
        };

        tracing::info!(
            listing_id = %listing.id,
            seller = %listing.author.user_id,
            category = listing.category.as_str(),
            "listing created"
        );
        self.store.insert(listing.clone());
        Ok(listing)
    }

    /// Query listings. Snapshot copy, one predicate pass per active
    /// criterion, one sort pass. Only `Active` listings are visible
    /// unless the filter says otherwise. No match yields an empty vec.
    pub fn get_listings(&self, filter: &ListingFilter) -> Vec<Listing> {
        let mut listings = self.store.snapshot();

        match (filter.status, filter.include_all_statuses) {
            (Some(status), _) => listings.retain(|l| l.status == status),
            (None, false) => listings.retain(|l| l.status == ListingStatus::Active),
            (None, true) => {}
        }

        if let Some(query) = &filter.search {
            let needle = query.to_lowercase();
            listings.retain(|l| {
                l.title.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
                    || l.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            });
        }

        if let Some(category) = filter.category {
            listings.retain(|l| l.category == category);
        }

        if let Some(kind) = filter.kind {
            listings.retain(|l| l.kind == kind);
        }

        if let Some(location) = &filter.location {
            listings.retain(|l| l.location == *location);
        }

        match filter.sort {
            // Creates prepend, so the snapshot is already newest first.
            ListingSort::Newest => {}
            ListingSort::Oldest => listings.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ListingSort::PriceLow => listings.sort_by(|a, b| a.price.cmp(&b.price)),
            ListingSort::PriceHigh => listings.sort_by(|a, b| b.price.cmp(&a.price)),
            ListingSort::Popular => listings.sort_by(|a, b| {
                b.popularity()
                    .cmp(&a.popularity())
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        if let Some(limit) = filter.limit {
            listings.truncate(limit);
        }

        tracing::debug!(results = listings.len(), "listing query");
        listings
    }

    /// First page of active listings
    pub fn recent(&self) -> Vec<Listing> {
        self.get_listings(&ListingFilter {
            limit: Some(self.config.default_page_size),
            ..Default::default()
        })
    }

    pub fn get_listing(&self, id: Uuid) -> Option<Listing> {
        self.store.get(id)
    }

    /// Merge a patch into a listing. Only the seller may edit.
    pub fn update_listing(
        &self,
        id: Uuid,
        patch: UpdateListing,
        acting_user: Uuid,
    ) -> StoreResult<Listing> {
        patch.validate()?;
        if let Some(description) = &patch.description {
            self.check_description_len(description)?;
        }

        let result = self.store.with_mut(id, |listing| {
            if listing.author.user_id != acting_user {
                return Err(StoreError::forbidden("only the seller can edit a listing"));
            }
            if let Some(title) = patch.title {
                listing.title = title;
            }
            if let Some(description) = patch.description {
                listing.description = description;
            }
            if let Some(category) = patch.category {
                listing.category = category;
            }
            if let Some(price) = patch.price {
                listing.price = price;
            }
            if let Some(unit) = patch.unit {
                listing.unit = Some(unit);
            }
            if let Some(location) = patch.location {
                listing.location = location;
            }
            if let Some(tags) = patch.tags {
                listing.tags = normalize_tags(&tags);
            }
            if let Some(images) = patch.images {
                listing.images = images;
            }
            listing.updated_at = Utc::now();
            Ok(listing.clone())
        });

        match result {
            None => Err(StoreError::not_found("listing", id)),
            Some(Ok(listing)) => {
                tracing::info!(listing_id = %id, "listing updated");
                Ok(listing)
            }
            Some(err) => err,
        }
    }

    /// Delete a listing. Only the seller may delete.
    pub fn delete_listing(&self, id: Uuid, acting_user: Uuid) -> StoreResult<()> {
        let listing = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::not_found("listing", id))?;
        if listing.author.user_id != acting_user {
            return Err(StoreError::forbidden("only the seller can delete a listing"));
        }

        self.store.remove(id);
        tracing::info!(listing_id = %id, "listing deleted");
        Ok(())
    }

    /// Owner-only `Active -> Sold` transition
    pub fn mark_sold(&self, id: Uuid, acting_user: Uuid) -> StoreResult<Listing> {
        let result = self.store.with_mut(id, |listing| {
            if listing.author.user_id != acting_user {
                return Err(StoreError::forbidden("only the seller can mark a listing sold"));
            }
            if listing.status != ListingStatus::Active {
                return Err(StoreError::InvalidTransition(format!(
                    "listing is already {}",
                    listing.status.as_str()
                )));
            }
            listing.status = ListingStatus::Sold;
            listing.updated_at = Utc::now();
            Ok(listing.clone())
        });

        match result {
            None => Err(StoreError::not_found("listing", id)),
            Some(Ok(listing)) => {
                tracing::info!(listing_id = %id, "listing marked sold");
                Ok(listing)
            }
            Some(err) => err,
        }
    }

    // ============================================
    // Engagement
    // ============================================

    /// Unconditional view counter bump; no dedup. Returns the new count.
    pub fn record_view(&self, id: Uuid) -> StoreResult<u32> {
        self.store
            .with_mut(id, |listing| {
                listing.views += 1;
                listing.views
            })
            .ok_or_else(|| StoreError::not_found("listing", id))
    }

    /// Record buying interest and hand back the seller snapshot so the
    /// caller can show contact details. Sellers cannot contact themselves.
    pub fn contact_seller(&self, id: Uuid, user_id: Uuid) -> StoreResult<AuthorSnapshot> {
        let result = self.store.with_mut(id, |listing| {
            if listing.author.user_id == user_id {
                return Err(StoreError::InvalidInput(
                    "cannot contact your own listing".to_string(),
                ));
            }
            listing.contacts += 1;
            Ok(listing.author.clone())
        });

        match result {
            None => Err(StoreError::not_found("listing", id)),
            Some(Ok(seller)) => {
                tracing::info!(listing_id = %id, buyer = %user_id, "seller contacted");
                Ok(seller)
            }
            Some(err) => err,
        }
    }

    /// Toggle the acting user's save. Returns true if the listing is now
    /// saved.
    pub fn toggle_save(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        self.store
            .with_mut(id, |listing| listing.toggle_save(user_id))
            .ok_or_else(|| StoreError::not_found("listing", id))
    }

    /// Listings the user has saved, newest first
    pub fn saved_listings(&self, user_id: Uuid) -> Vec<Listing> {
        let mut listings = self.store.snapshot();
        listings.retain(|l| l.saved_by.contains(&user_id));
        listings
    }

    /// A seller's own listings regardless of status, newest first
    pub fn listings_by(&self, seller_id: Uuid) -> Vec<Listing> {
        let mut listings = self.store.snapshot();
        listings.retain(|l| l.author.user_id == seller_id);
        listings
    }

    fn check_description_len(&self, description: &str) -> StoreResult<()> {
        if description.chars().count() > self.config.max_content_len {
            return Err(StoreError::InvalidInput(format!(
                "description exceeds {} characters",
                self.config.max_content_len
            )));
        }
        Ok(())
    }
}
