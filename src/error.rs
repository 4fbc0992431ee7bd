//! Error types for ducat_tally

use thiserror::Error;

/// Unified error type for reconciliation and pricing operations.
///
/// Network and HTTP failures never surface here: the fetch path collapses
/// every per-item transport failure to "no price" so a batch keeps going.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a JSON file
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The inventory export file is not present
    #[error("Inventory export not found: {0}")]
    MissingInventory(String),

    /// None of the category catalog files could be loaded
    #[error("No catalog files found in {0}")]
    NoCatalogFiles(String),
}

/// Result alias for ducat_tally operations
pub type Result<T> = std::result::Result<T, Error>;
