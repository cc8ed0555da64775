//! Last-result cache: one slot per kind of read, overwritten on every success.

use std::sync::{Arc, RwLock};

use payments_api::types::Page;

/// Holds the most recent value published into it.
///
/// Writes swap the whole value under a lock, so readers see either the old
/// or the new value and the last writer wins. There is no invalidation; the
/// slot is only ever overwritten.
pub struct CacheSlot<T> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheSlot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    /// Replaces the slot's contents.
    pub fn publish(&self, value: T) {
        let value = Arc::new(value);
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = Some(value);
    }

    /// Returns the last published value, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        self.value
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.value
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

/// A cached collection read: either a bare list or a server page.
#[derive(Clone, Debug, PartialEq)]
pub enum Listing<T> {
    List(Vec<T>),
    Page(Page<T>),
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Listing::List(items) => items,
            Listing::Page(page) => &page.content,
        }
    }

    /// Server-side total for pages, list length otherwise.
    pub fn total_elements(&self) -> i64 {
        match self {
            Listing::List(items) => items.len() as i64,
            Listing::Page(page) => page.total_elements,
        }
    }

    pub fn total_pages(&self) -> i64 {
        match self {
            Listing::List(_) => 1,
            Listing::Page(page) => page.total_pages,
        }
    }
}

/// The cache slots owned by one resource service.
///
/// `current` holds the last single-item read; `listing` holds the last
/// list, relation, search or page read.
pub struct ResourceCache<T> {
    current: CacheSlot<T>,
    listing: CacheSlot<Listing<T>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceCache<T> {
    pub fn new() -> Self {
        Self {
            current: CacheSlot::new(),
            listing: CacheSlot::new(),
        }
    }

    pub fn current(&self) -> Option<Arc<T>> {
        self.current.get()
    }

    pub fn listing(&self) -> Option<Arc<Listing<T>>> {
        self.listing.get()
    }
}

impl<T: Clone> ResourceCache<T> {
    pub(crate) fn publish_item(&self, item: &T) {
        self.current.publish(item.clone());
    }

    pub(crate) fn publish_list(&self, items: &[T]) {
        self.listing.publish(Listing::List(items.to_vec()));
    }

    pub(crate) fn publish_page(&self, page: &Page<T>) {
        self.listing.publish(Listing::Page(page.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<i64>, total: i64) -> Page<i64> {
        Page {
            content: items,
            total_pages: 1,
            total_elements: total,
            page_number: 0,
            size: None,
        }
    }

    #[test]
    fn slot_starts_empty() {
        let slot: CacheSlot<i64> = CacheSlot::new();
        assert!(slot.is_empty());
        assert!(slot.get().is_none());
    }

    #[test]
    fn slot_last_write_wins() {
        let slot = CacheSlot::new();
        slot.publish("old".to_string());
        slot.publish("new".to_string());
        assert_eq!(slot.get().as_deref().map(String::as_str), Some("new"));
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let slot = CacheSlot::new();
        slot.publish(1);
        let before = slot.get().unwrap();
        slot.publish(2);
        assert_eq!(*before, 1);
        assert_eq!(*slot.get().unwrap(), 2);
    }

    #[test]
    fn listing_replaces_instead_of_merging() {
        let cache: ResourceCache<i64> = ResourceCache::new();
        cache.publish_page(&page(vec![1, 2, 3], 30));
        cache.publish_list(&[9]);

        let listing = cache.listing().unwrap();
        assert_eq!(listing.items(), &[9]);
        assert_eq!(listing.total_elements(), 1);
        assert_eq!(listing.total_pages(), 1);
    }

    #[test]
    fn page_listing_reports_server_totals() {
        let cache: ResourceCache<i64> = ResourceCache::new();
        cache.publish_page(&page(vec![1, 2], 47));
        assert_eq!(cache.listing().unwrap().total_elements(), 47);
        assert!(cache.current().is_none());
    }

    #[test]
    fn concurrent_writers_leave_one_whole_value() {
        let slot = Arc::new(CacheSlot::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let slot = Arc::clone(&slot);
                std::thread::spawn(move || slot.publish(vec![i; 100]))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let value = slot.get().unwrap();
        assert_eq!(value.len(), 100);
        assert!(value.iter().all(|v| *v == value[0]));
    }
}
