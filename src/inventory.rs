//! Inventory flattening
//!
//! The game-save export is an arbitrarily nested JSON document with no fixed
//! schema depth. The only leaves we care about are mapping nodes carrying an
//! `ItemType` string next to a positive `ItemCount`.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Flat mapping from item-type path to owned count.
///
/// A `BTreeMap` so that iteration order is lexicographic; the resolver's
/// last-resort scan depends on a stable total order.
pub type FlatInventory = BTreeMap<String, u32>;

/// Read and flatten the inventory export at `path`.
///
/// A missing file is fatal to the current reconciliation pass; an unparsable
/// one surfaces as a parse error.
pub fn load_inventory(path: &Path) -> Result<FlatInventory> {
    if !path.exists() {
        return Err(Error::MissingInventory(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)?;

    let inventory = flatten_inventory(&data);
    log::info!(
        "Flattened inventory: {} item types from {}",
        inventory.len(),
        path.display()
    );
    Ok(inventory)
}

/// Flatten a raw inventory tree into item-type counts.
///
/// Recurses into every mapping and sequence node. A mapping node whose
/// `ItemType` field is a string and whose `ItemCount` is a positive integer
/// contributes one entry; on a repeated item type the last writer wins.
pub fn flatten_inventory(data: &Value) -> FlatInventory {
    let mut inventory = FlatInventory::new();
    flatten_into(data, &mut inventory);
    inventory
}

fn flatten_into(data: &Value, inventory: &mut FlatInventory) {
    match data {
        Value::Object(map) => {
            if let Some(Value::String(item_type)) = map.get("ItemType") {
                let count = map.get("ItemCount").and_then(Value::as_i64).unwrap_or(0);
                if count > 0 {
                    inventory.insert(item_type.clone(), count as u32);
                }
            }
            for value in map.values() {
                if value.is_object() || value.is_array() {
                    flatten_into(value, inventory);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    flatten_into(item, inventory);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
