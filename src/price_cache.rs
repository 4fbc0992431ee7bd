//! Persistent TTL cache for marketplace prices
//!
//! Keyed by display name. Entries younger than an hour are served without a
//! network round trip; "no price" results are cached too so an unlisted item
//! is not hammered on every pass. During a fetch job only the worker writes;
//! the foreground only reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries older than this are stale and refetched
pub const PRICE_TTL_SECS: i64 = 3600;

/// Cached aggregation result for one display name; `price` is `None` when
/// the market had no usable listings at fetch time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceEntry {
    pub price: Option<u32>,
    pub timestamp: i64,
}

impl PriceEntry {
    pub fn is_fresh(&self, now: i64) -> bool {
        now - self.timestamp < PRICE_TTL_SECS
    }
}

/// In-memory price map with a JSON file behind it
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PriceCache {
    entries: HashMap<String, PriceEntry>,
    #[serde(skip)]
    path: PathBuf,
}

/// Current epoch seconds
pub fn epoch_now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl PriceCache {
    /// Default cache file location
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ducat_tally")
            .join("price_cache.json")
    }

    /// Load the cache from `path`, or start empty if the file is missing or
    /// corrupt. Never fatal.
    pub fn load(path: &Path) -> Self {
        let mut cache = if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str::<PriceCache>(&content) {
                    Ok(cache) => {
                        log::info!("Loaded price cache with {} entries", cache.entries.len());
                        cache
                    }
                    Err(e) => {
                        log::warn!("Failed to parse price cache, starting fresh: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read price cache, starting fresh: {}", e);
                    Self::default()
                }
            }
        } else {
            log::info!("Starting with empty price cache");
            Self::default()
        };
        cache.path = path.to_path_buf();
        cache
    }

    /// Flush the whole map to disk, rewriting the file in full
    pub fn save(&self) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, content)?;
        log::debug!("Saved price cache with {} entries", self.entries.len());
        Ok(())
    }

    pub fn get(&self, display_name: &str) -> Option<&PriceEntry> {
        self.entries.get(display_name)
    }

    /// The cached price when the entry is still fresh. The outer `None`
    /// means "stale or absent, fetch it"; `Some(None)` means "fresh, the
    /// market had nothing".
    pub fn fresh_price(&self, display_name: &str, now: i64) -> Option<Option<u32>> {
        self.entries
            .get(display_name)
            .filter(|e| e.is_fresh(now))
            .map(|e| e.price)
    }

    /// Record a fetch outcome, successful or not
    pub fn put(&mut self, display_name: &str, price: Option<u32>, now: i64) {
        self.entries.insert(
            display_name.to_string(),
            PriceEntry {
                price,
                timestamp: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
