//! Reading and memorization marks
//!
//! Every failure here is logged and treated as "no mark": the reader keeps
//! working when storage is unavailable.

use crate::constants::{
    AUTO_SAVE_KEY, BOOKMARK_KEY, FIRST_PAGE, HIFDH_KEY, HIFDH_PAGES_KEY, LAST_PAGE, LAST_READ_KEY,
};
use crate::persistence::KeyValueStore;
use crate::types::Marks;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
    /// Held across read-modify-write of the memorized list; shared by clones
    pages_lock: Arc<Mutex<()>>,
}

impl BookmarkStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        BookmarkStore {
            store,
            pages_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable value for {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {:#}", key, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode {}: {}", key, e);
                return false;
            }
        };
        match self.store.set(key, raw).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save {}: {:#}", key, e);
                false
            }
        }
    }

    async fn remove(&self, key: &str) -> bool {
        match self.store.remove(key).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to clear {}: {:#}", key, e);
                false
            }
        }
    }

    async fn read_page(&self, key: &str) -> Option<u16> {
        let page: u16 = self.read(key).await?;
        if (FIRST_PAGE..=LAST_PAGE).contains(&page) {
            Some(page)
        } else {
            tracing::warn!("Ignoring out-of-range page {} stored under {}", page, key);
            None
        }
    }

    pub async fn reading_mark(&self) -> Option<u16> {
        self.read_page(LAST_READ_KEY).await
    }

    pub async fn hifdh_mark(&self) -> Option<u16> {
        self.read_page(HIFDH_KEY).await
    }

    /// Load every mark at once; the two primary reads run concurrently
    pub async fn load(&self) -> Marks {
        let (reading, hifdh) = tokio::join!(self.reading_mark(), self.hifdh_mark());
        let (bookmark, hifdh_pages, auto_save) = tokio::join!(
            self.bookmark_page(),
            self.hifdh_pages(),
            self.auto_save_enabled()
        );

        tracing::debug!(
            "Marks loaded: reading={:?}, hifdh={:?}, bookmark={:?}, {} memorized pages",
            reading,
            hifdh,
            bookmark,
            hifdh_pages.len()
        );

        Marks {
            reading,
            hifdh,
            bookmark,
            hifdh_pages,
            auto_save,
        }
    }

    pub async fn save_reading_mark(&self, page: u16) -> bool {
        tracing::info!("Saving reading mark at page {}", page);
        self.write(LAST_READ_KEY, &page).await
    }

    pub async fn save_hifdh_mark(&self, page: u16) -> bool {
        tracing::info!("Saving hifdh mark at page {}", page);
        self.write(HIFDH_KEY, &page).await
    }

    pub async fn clear_reading_mark(&self) -> bool {
        self.remove(LAST_READ_KEY).await
    }

    pub async fn bookmark_page(&self) -> Option<u16> {
        self.read_page(BOOKMARK_KEY).await
    }

    pub async fn save_bookmark_page(&self, page: Option<u16>) -> bool {
        match page {
            Some(page) => self.write(BOOKMARK_KEY, &page).await,
            None => self.remove(BOOKMARK_KEY).await,
        }
    }

    /// Memorized pages, sorted and without duplicates or invalid entries
    pub async fn hifdh_pages(&self) -> Vec<u16> {
        let mut pages: Vec<u16> = self.read(HIFDH_PAGES_KEY).await.unwrap_or_default();
        pages.retain(|page| (FIRST_PAGE..=LAST_PAGE).contains(page));
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    /// Add or remove a page from the memorized list, returning the new list
    pub async fn toggle_hifdh_page(&self, page: u16) -> Vec<u16> {
        let _guard = self.pages_lock.lock().await;
        let mut pages = self.hifdh_pages().await;
        match pages.binary_search(&page) {
            Ok(idx) => {
                pages.remove(idx);
            }
            Err(idx) => pages.insert(idx, page),
        }
        self.write(HIFDH_PAGES_KEY, &pages).await;
        pages
    }

    /// Defaults to enabled when never set or unreadable
    pub async fn auto_save_enabled(&self) -> bool {
        self.read(AUTO_SAVE_KEY).await.unwrap_or(true)
    }

    pub async fn set_auto_save_enabled(&self, enabled: bool) -> bool {
        self.write(AUTO_SAVE_KEY, &enabled).await
    }
}
