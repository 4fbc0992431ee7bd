//! Ducat Tally - Warframe prime-part reconciliation & pricing
//!
//! Reconciles a raw game-save inventory export against per-category catalogs
//! of prime items, resolves how many units of each tradeable component the
//! player owns, and enriches the result with warframe.market sell prices
//! fetched under the API's rate limit and cached for an hour.

pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod inventory;
pub mod marked;
pub mod market;
pub mod price_cache;
pub mod resolver;

pub use catalog::{load_catalogs, Catalog, CatalogItem, Component};
pub use error::{Error, Result};
pub use fetcher::{FetchEvent, PriceFetcher};
pub use inventory::{flatten_inventory, load_inventory, FlatInventory};
pub use marked::{full_trades, MarkedItems};
pub use market::{item_name_to_slug, reasonable_price, slug_variations};
pub use price_cache::{PriceCache, PriceEntry};
pub use resolver::{resolve_owned_components, OwnedComponent};
