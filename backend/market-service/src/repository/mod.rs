/// In-memory storage for marketplace listings
///
/// Same shape as the feed store: an explicit injected object, collections
/// behind `parking_lot` locks, creates prepend, queries work on a snapshot
/// copy taken under the read lock.
use crate::models::Listing;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MarketStore {
    listings: RwLock<Vec<Listing>>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new listing
    pub fn insert(&self, listing: Listing) {
        self.listings.write().insert(0, listing);
    }

    /// Copy of the whole collection, taken under the read lock
    pub fn snapshot(&self) -> Vec<Listing> {
        self.listings.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Listing> {
        self.listings.read().iter().find(|l| l.id == id).cloned()
    }

    /// Run a closure against a listing under the write lock.
    /// Returns `None` if the id is absent.
    pub fn with_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut Listing) -> R) -> Option<R> {
        let mut listings = self.listings.write();
        listings.iter_mut().find(|l| l.id == id).map(f)
    }

    pub fn remove(&self, id: Uuid) -> Option<Listing> {
        let mut listings = self.listings.write();
        let index = listings.iter().position(|l| l.id == id)?;
        Some(listings.remove(index))
    }

    pub fn len(&self) -> usize {
        self.listings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.read().is_empty()
    }
}
