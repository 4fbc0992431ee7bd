//! Catalog loading
//!
//! Per-category catalog files are JSON arrays of items as exported by the
//! API helper. Only items flagged `isPrime` participate in reconciliation.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A sub-part of a catalog item, individually tradeable for ducats/platinum
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default)]
    pub unique_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub component_type: String,
    #[serde(default)]
    pub ducats: u32,
    #[serde(default)]
    pub prime_selling_price: u32,
    #[serde(default)]
    pub tradable: bool,
}

/// A single catalog item with its component list
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unique_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub slot: Option<i32>,
    #[serde(default)]
    pub is_prime: bool,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Prime items loaded from the category catalogs plus the
/// `uniqueName -> category` index built while loading
#[derive(Debug, Default)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
    pub category_index: HashMap<String, String>,
    pub loaded_files: usize,
}

/// Category name -> catalog file names, matching the API helper's output.
/// `Companions` and `Archwing` span several files.
pub const CATEGORY_FILES: &[(&str, &[&str])] = &[
    ("Warframes", &["Warframes.json"]),
    ("Primary", &["Primary.json"]),
    ("Secondary", &["Secondary.json"]),
    ("Melee", &["Melee.json"]),
    ("Companions", &["Sentinels.json", "SentinelWeapons.json"]),
    ("Archwing", &["Arch-Gun.json", "Arch-Melee.json", "Archwing.json"]),
];

/// Single fallback catalog tried when no category file produced anything
const FALLBACK_FILE: &str = "Primary.json";

/// Load every category catalog under `data_dir`.
///
/// Missing files are skipped; unparsable files are logged and skipped so the
/// rest of the load still succeeds. Duplicate `uniqueName`s across files:
/// last-loaded wins in the category index. Only when no file at all could be
/// loaded (including the fallback) does this fail.
pub fn load_catalogs(data_dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::default();

    for (category, files) in CATEGORY_FILES {
        for filename in *files {
            let path = data_dir.join(filename);
            if !path.exists() {
                continue;
            }
            match load_catalog_file(&path) {
                Ok(items) => {
                    for item in items.into_iter().filter(|i| i.is_prime) {
                        if !item.unique_name.is_empty() {
                            catalog
                                .category_index
                                .insert(item.unique_name.clone(), category.to_string());
                        }
                        catalog.items.push(item);
                    }
                    catalog.loaded_files += 1;
                }
                Err(e) => {
                    log::warn!("Skipping catalog file {}: {}", path.display(), e);
                }
            }
        }
    }

    if catalog.loaded_files == 0 {
        let fallback = data_dir.join(FALLBACK_FILE);
        if fallback.exists() {
            let items = load_catalog_file(&fallback)?;
            catalog.items.extend(items.into_iter().filter(|i| i.is_prime));
            catalog.loaded_files = 1;
        }
    }

    if catalog.loaded_files == 0 {
        return Err(Error::NoCatalogFiles(data_dir.display().to_string()));
    }

    log::info!(
        "Loaded {} prime items from {} catalog files",
        catalog.items.len(),
        catalog.loaded_files
    );
    Ok(catalog)
}

fn load_catalog_file(path: &PathBuf) -> Result<Vec<CatalogItem>> {
    let content = std::fs::read_to_string(path)?;
    let items: Vec<CatalogItem> = serde_json::from_str(&content)?;
    log::debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
