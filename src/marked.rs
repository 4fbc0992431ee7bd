//! Marked-item bookkeeping
//!
//! The set's contents belong to the UI layer; this side only persists the
//! strings verbatim and answers membership tests. A whole base item can be
//! marked at once through a `BASE:<name>` marker. Marked items are excluded
//! from aggregate counting.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::resolver::OwnedComponent;

/// Components traded per full trade
const TRADE_SIZE: u32 = 6;

/// Opaque string set persisted as a JSON array
#[derive(Debug, Default)]
pub struct MarkedItems {
    names: HashSet<String>,
    path: PathBuf,
}

impl MarkedItems {
    /// Load from `path`; a missing or corrupt file yields an empty set
    pub fn load(path: &Path) -> Self {
        let names = if path.exists() {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|content| serde_json::from_str::<Vec<String>>(&content).ok())
                .map(HashSet::from_iter)
                .unwrap_or_default()
        } else {
            HashSet::new()
        };
        Self {
            names,
            path: path.to_path_buf(),
        }
    }

    /// Rewrite the backing file in full
    pub fn save(&self) -> crate::error::Result<()> {
        let names: Vec<&String> = self.names.iter().collect();
        std::fs::write(&self.path, serde_json::to_string(&names)?)?;
        Ok(())
    }

    /// A display name is marked directly or through its base item's marker
    pub fn is_marked(&self, display_name: &str, base_name: &str) -> bool {
        if self.names.contains(display_name) {
            return true;
        }
        !base_name.is_empty() && self.names.contains(&format!("BASE:{}", base_name))
    }

    pub fn insert(&mut self, name: String) {
        self.names.insert(name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Total owned units across unmarked items and how many full trades they
/// make (six components per trade)
pub fn full_trades(items: &[OwnedComponent], marked: &MarkedItems) -> (u32, u32) {
    let total: u32 = items
        .iter()
        .filter(|item| !marked.is_marked(&item.display_name, &item.base_name))
        .map(|item| item.amount)
        .sum();
    (total / TRADE_SIZE, total)
}
