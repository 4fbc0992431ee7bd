//! Component resolution
//!
//! For every (prime item, component) pair from the catalog, decides whether
//! the component is trade-relevant and how many units the player owns. The
//! tricky part is ownership: a component's catalog identifier rarely matches
//! the path the game stores the part under, so the count is resolved through
//! an ordered chain of naming-convention fallbacks. The first step yielding a
//! positive count wins.

use crate::catalog::{Catalog, CatalogItem, Component};
use crate::inventory::FlatInventory;

/// Component-name words that identify a valid tradeable part
const VALID_COMPONENT_TYPES: &[&str] = &[
    "Blueprint",
    "Barrel",
    "Receiver",
    "Stock",
    "Link",
    "Blade",
    "Hilt",
    "Handle",
    "Grip",
    "Lower Limb",
    "Upper Limb",
    "String",
    "Chassis",
    "Neuroptics",
    "Systems",
    "Harness",
    "Cerebrum",
    "Carapace",
    "Wings",
    "Head",
    "Gauntlet",
    "Boot",
    "Blades",
    "Disc",
    "Ornament",
    "Stars",
    "Chain",
    "Pouch",
    "Band",
    "Buckle",
    "Prime Blueprint",
];

/// Crafting-material names that disqualify a component outright
const RESOURCE_KEYWORDS: &[&str] = &[
    "Orokin Cell",
    "Neurodes",
    "Argon Crystal",
    "Cryotic",
    "Ferrite",
    "Alloy Plate",
    "Rubedo",
    "Plastids",
    "Nano Spores",
    "Polymer Bundle",
    "Circuits",
    "Salvage",
    "Control Module",
    "Morphics",
    "Gallium",
    "Neural Sensors",
    "Oxium",
    "Tellurium",
    "Hexenon",
    "Thrax Plasm",
    "Entrati Lanthorn",
    "Voidgel Orb",
    "Tauforged Shard",
];

/// Catalog items excluded regardless of eligibility; these carry deceptive
/// names that collide with unrelated upstream entries
const EXCLUDED_ITEM_NAMES: &[&str] = &["Galariak Prime", "Sagek Prime"];

/// Warframe sub-parts that have a per-frame blueprint path
const WARFRAME_SUB_PARTS: &[&str] = &["Neuroptics", "Chassis", "Systems"];

const WARFRAME_RECIPES: &str = "/Lotus/Types/Recipes/WarframeRecipes/";
const WEAPON_RECIPES: &str = "/Lotus/Types/Recipes/Weapons/";

/// Slot index -> category, used when an item carries neither an index entry
/// nor its own category field
const SLOT_CATEGORIES: &[(i32, &str)] = &[
    (0, "Warframes"),
    (1, "Primary"),
    (2, "Secondary"),
    (3, "Melee"),
    (4, "Companions"),
    (5, "Archwing"),
];

/// A catalog component the player actually owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedComponent {
    /// "<item name> <component name>"; the sole join key between inventory,
    /// price cache and callers
    pub display_name: String,
    pub amount: u32,
    pub ducats: u32,
    pub base_name: String,
    pub component_type: String,
    pub category: String,
}

/// Resolve every owned component from the flattened inventory and catalog.
///
/// Deterministic: the same inputs always produce the same list in the same
/// order, sorted by (base name, component type). Components with no owned
/// units are dropped, not reported.
pub fn resolve_owned_components(
    inventory: &FlatInventory,
    catalog: &Catalog,
) -> Vec<OwnedComponent> {
    let mut owned = Vec::new();

    for item in &catalog.items {
        if item.name.is_empty() || !item.name.contains("Prime") {
            continue;
        }
        if EXCLUDED_ITEM_NAMES.iter().any(|n| item.name.contains(n)) {
            continue;
        }

        for component in &item.components {
            if component.unique_name.is_empty() {
                continue;
            }
            if !is_eligible(component) {
                continue;
            }

            let amount = resolve_amount(inventory, item, component);
            if amount == 0 {
                continue;
            }

            owned.push(OwnedComponent {
                display_name: format!("{} {}", item.name, component.name),
                amount,
                ducats: component.ducats,
                base_name: item.name.clone(),
                component_type: component.name.clone(),
                category: resolve_category(catalog, item),
            });
        }
    }

    owned.sort_by(|a, b| {
        a.base_name
            .cmp(&b.base_name)
            .then_with(|| a.component_type.cmp(&b.component_type))
    });
    owned
}

/// Eligibility filter: non-resource, not a raw crafting material, and either
/// named like a known part type or independently worth something.
fn is_eligible(component: &Component) -> bool {
    if component.component_type == "Resource" {
        return false;
    }

    let name_lower = component.name.to_lowercase();
    if RESOURCE_KEYWORDS
        .iter()
        .any(|kw| name_lower.contains(&kw.to_lowercase()))
    {
        return false;
    }

    if matches_component_vocabulary(&name_lower) {
        return true;
    }

    // Unrecognized name, but still tradeworthy on its own merits
    component.ducats > 0 || component.prime_selling_price > 0 || component.tradable
}

/// Matches `name_lower` against the part-type vocabulary by exact,
/// leading-word, trailing-word, or interior whole-word position.
fn matches_component_vocabulary(name_lower: &str) -> bool {
    VALID_COMPONENT_TYPES.iter().any(|valid| {
        let valid = valid.to_lowercase();
        name_lower == valid
            || name_lower.starts_with(&format!("{} ", valid))
            || name_lower.ends_with(&format!(" {}", valid))
            || format!(" {} ", name_lower).contains(&format!(" {} ", valid))
    })
}

/// Ownership fallback chain; the first step yielding a positive count wins.
fn resolve_amount(inventory: &FlatInventory, item: &CatalogItem, component: &Component) -> u32 {
    let unique_name = &component.unique_name;

    // 1. Direct lookup of the component's own identifier
    if let Some(&count) = inventory.get(unique_name) {
        if count > 0 {
            return count;
        }
    }

    let segment = unique_name.rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return 0;
    }

    // 2. Prime warframe sub-parts live under a per-frame blueprint path
    //    built from the item name itself
    if item.name.contains("Prime") {
        if let Some(part) = WARFRAME_SUB_PARTS
            .iter()
            .find(|p| component.name.to_lowercase().contains(&p.to_lowercase()))
        {
            let base: String = item.name.split_whitespace().collect();
            let path = format!("{}{}{}Blueprint", WARFRAME_RECIPES, base, part);
            if let Some(&count) = inventory.get(&path) {
                if count > 0 {
                    return count;
                }
            }
        }
    }

    // 3. Warframe-items namespace -> recipe namespace rewrite
    if unique_name.contains("/Items/Warframes/") || unique_name.contains("/Types/Items/Warframes/")
    {
        let mut recipe_path = unique_name
            .replace("/Items/Warframes/", "/Recipes/WarframeRecipes/")
            .replace("/Types/Items/Warframes/", "/Types/Recipes/WarframeRecipes/");
        if recipe_path.ends_with("Component") {
            recipe_path = recipe_path.replace("Component", "Blueprint");
        } else if !recipe_path.ends_with("Blueprint") {
            recipe_path.push_str("Blueprint");
        }
        if let Some(&count) = inventory.get(&recipe_path) {
            if count > 0 {
                return count;
            }
        }
    }

    // 4./5. Bare trailing segment under the warframe recipe namespace
    let recipe_path = if segment.ends_with("Component") {
        format!(
            "{}{}",
            WARFRAME_RECIPES,
            segment.replace("Component", "Blueprint")
        )
    } else if !segment.ends_with("Blueprint") {
        format!("{}{}Blueprint", WARFRAME_RECIPES, segment)
    } else {
        format!("{}{}", WARFRAME_RECIPES, segment)
    };
    if let Some(&count) = inventory.get(&recipe_path) {
        if count > 0 {
            return count;
        }
    }

    // 6. Same segment under the weapon recipe namespace
    for path in [
        format!("{}{}Blueprint", WEAPON_RECIPES, segment),
        format!("{}{}", WEAPON_RECIPES, segment),
    ] {
        if let Some(&count) = inventory.get(&path) {
            if count > 0 {
                return count;
            }
        }
    }

    // 7. Last resort: scan every recipe path for a blueprint of the base
    //    name. FlatInventory iterates lexicographically, so ties between
    //    multiple matching paths resolve to the smallest path.
    let base_name = if segment.ends_with("Component") {
        segment.replace("Component", "")
    } else if segment.ends_with("Blueprint") {
        segment.replace("Blueprint", "")
    } else {
        segment.to_string()
    };

    let mut search_names = vec![base_name.clone()];
    if base_name.contains("Helmet") {
        search_names.push(base_name.replace("Helmet", "Neuroptics"));
    }

    for (inv_path, &count) in inventory {
        if !inv_path.contains("/Recipes/") {
            continue;
        }
        for search_name in &search_names {
            if inv_path.ends_with(&format!("{}Blueprint", search_name))
                || inv_path.contains(&format!("/{}Blueprint", search_name))
            {
                if count > 0 {
                    return count;
                }
            }
        }
    }

    0
}

/// Category for a resolved item: the index built while loading wins, then
/// the item's own category field, then its slot.
fn resolve_category(catalog: &Catalog, item: &CatalogItem) -> String {
    if let Some(category) = catalog.category_index.get(&item.unique_name) {
        return category.clone();
    }
    if let Some(category) = &item.category {
        if !category.is_empty() {
            return category.clone();
        }
    }
    if let Some(slot) = item.slot {
        if let Some((_, category)) = SLOT_CATEGORIES.iter().find(|(s, _)| *s == slot) {
            return category.to_string();
        }
    }
    "Unknown".to_string()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
