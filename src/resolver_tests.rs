//! Tests for component resolution

use crate::catalog::{Catalog, CatalogItem, Component};
use crate::inventory::FlatInventory;
use crate::resolver::resolve_owned_components;

fn component(unique_name: &str, name: &str) -> Component {
    Component {
        unique_name: unique_name.to_string(),
        name: name.to_string(),
        component_type: "Item".to_string(),
        ducats: 45,
        prime_selling_price: 0,
        tradable: false,
    }
}

fn prime_item(name: &str, unique_name: &str, components: Vec<Component>) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        unique_name: unique_name.to_string(),
        category: None,
        slot: None,
        is_prime: true,
        components,
    }
}

fn catalog_of(items: Vec<CatalogItem>) -> Catalog {
    Catalog {
        items,
        category_index: Default::default(),
        loaded_files: 1,
    }
}

fn inventory_of(entries: &[(&str, u32)]) -> FlatInventory {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}

#[test]
fn direct_lookup_wins() {
    let catalog = catalog_of(vec![prime_item(
        "Braton Prime",
        "/Lotus/Weapons/BratonPrime",
        vec![component("/Lotus/Types/Recipes/Weapons/WeaponParts/BratonPrimeStock", "Stock")],
    )]);
    let inventory = inventory_of(&[(
        "/Lotus/Types/Recipes/Weapons/WeaponParts/BratonPrimeStock",
        4,
    )]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].display_name, "Braton Prime Stock");
    assert_eq!(owned[0].amount, 4);
    assert_eq!(owned[0].ducats, 45);
}

#[test]
fn component_suffix_falls_back_to_warframe_recipe_blueprint() {
    // No direct match; the Component -> Blueprint rewrite under the
    // warframe recipe namespace finds the owned count
    let catalog = catalog_of(vec![prime_item(
        "Volt Prime",
        "/Lotus/Powersuits/VoltPrime",
        vec![component(
            "/Lotus/Types/Items/Warframes/VoltPrime/VoltPrimeSystemsComponent",
            "Systems",
        )],
    )]);
    let inventory = inventory_of(&[(
        "/Lotus/Types/Recipes/WarframeRecipes/VoltPrimeSystemsBlueprint",
        2,
    )]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].amount, 2);
}

#[test]
fn warframe_items_namespace_rewrites_to_recipe_namespace() {
    let catalog = catalog_of(vec![prime_item(
        "Nyx Prime",
        "/Lotus/Powersuits/NyxPrime",
        vec![component(
            "/Lotus/Types/Items/Warframes/NyxPrime/NyxPrimeChassis",
            "Chassis",
        )],
    )]);
    // Rewritten namespace plus an appended Blueprint suffix
    let inventory = inventory_of(&[(
        "/Lotus/Types/Recipes/WarframeRecipes/NyxPrime/NyxPrimeChassisBlueprint",
        1,
    )]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].amount, 1);
}

#[test]
fn weapon_recipe_namespace_is_tried_after_warframe_recipes() {
    let catalog = catalog_of(vec![prime_item(
        "Paris Prime",
        "/Lotus/Weapons/ParisPrime",
        vec![component("/Lotus/Weapons/Tenno/Bows/ParisPrimeGrip", "Grip")],
    )]);
    let inventory = inventory_of(&[(
        "/Lotus/Types/Recipes/Weapons/ParisPrimeGripBlueprint",
        3,
    )]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].amount, 3);
}

#[test]
fn last_resort_scan_matches_helmet_as_neuroptics() {
    let catalog = catalog_of(vec![prime_item(
        "Mag Prime",
        "/Lotus/Powersuits/MagPrime",
        vec![component("/Lotus/Upgrades/Skins/MagPrimeHelmetComponent", "Neuroptics")],
    )]);
    let inventory = inventory_of(&[(
        "/Lotus/Types/Recipes/Components/MagPrimeNeuropticsBlueprint",
        2,
    )]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].amount, 2);
}

#[test]
fn last_resort_scan_ties_break_lexicographically() {
    let catalog = catalog_of(vec![prime_item(
        "Ash Prime",
        "/Lotus/Powersuits/AshPrime",
        vec![component("/Lotus/Misc/AshPrimeCarapaceComponent", "Carapace")],
    )]);
    let inventory = inventory_of(&[
        ("/Lotus/Types/Recipes/Z/AshPrimeCarapaceBlueprint", 9),
        ("/Lotus/Types/Recipes/A/AshPrimeCarapaceBlueprint", 5),
    ]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    // FlatInventory iterates lexicographically, so .../A/... wins
    assert_eq!(owned[0].amount, 5);
}

#[test]
fn unowned_components_are_dropped() {
    let catalog = catalog_of(vec![prime_item(
        "Braton Prime",
        "/Lotus/Weapons/BratonPrime",
        vec![component("/Lotus/Types/Recipes/Weapons/WeaponParts/BratonPrimeStock", "Stock")],
    )]);

    let owned = resolve_owned_components(&FlatInventory::new(), &catalog);
    assert!(owned.is_empty());
}

#[test]
fn resources_and_resource_named_components_are_excluded() {
    let mut resource = component("/Lotus/Types/Items/MiscItems/OrokinCell", "Orokin Cell");
    resource.component_type = "Resource".to_string();
    let mut sneaky = component("/Lotus/Types/Items/MiscItems/ArgonCrystal", "Argon Crystal");
    sneaky.component_type = "Item".to_string();

    let catalog = catalog_of(vec![prime_item(
        "Volt Prime",
        "/Lotus/Powersuits/VoltPrime",
        vec![resource, sneaky],
    )]);
    let inventory = inventory_of(&[
        ("/Lotus/Types/Items/MiscItems/OrokinCell", 20),
        ("/Lotus/Types/Items/MiscItems/ArgonCrystal", 11),
    ]);

    assert!(resolve_owned_components(&inventory, &catalog).is_empty());
}

#[test]
fn unrecognized_name_is_rescued_by_trade_value_only() {
    let mut worthless = component("/Lotus/Types/Items/A", "Strange Widget");
    worthless.ducats = 0;
    let mut tradable = component("/Lotus/Types/Items/B", "Strange Gadget");
    tradable.ducats = 0;
    tradable.tradable = true;

    let catalog = catalog_of(vec![prime_item(
        "Volt Prime",
        "/Lotus/Powersuits/VoltPrime",
        vec![worthless, tradable],
    )]);
    let inventory = inventory_of(&[("/Lotus/Types/Items/A", 1), ("/Lotus/Types/Items/B", 1)]);

    let owned = resolve_owned_components(&inventory, &catalog);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].component_type, "Strange Gadget");
}

#[test]
fn vocabulary_matches_by_word_position() {
    let names = [
        ("Blueprint", true),          // exact
        ("Blueprint Fragment", true), // leading word
        ("Upper Limb", true),         // exact multi-word
        ("Ornate Chain", true),       // trailing word
        ("Left Barrel Shroud", true), // interior whole word
        ("Barreled Thing", false),    // substring, not a whole word
    ];

    for (name, expect) in names {
        let mut c = component("/Lotus/Types/Items/X", name);
        c.ducats = 0;
        let catalog = catalog_of(vec![prime_item(
            "Volt Prime",
            "/Lotus/Powersuits/VoltPrime",
            vec![c],
        )]);
        let inventory = inventory_of(&[("/Lotus/Types/Items/X", 1)]);
        let owned = resolve_owned_components(&inventory, &catalog);
        assert_eq!(owned.len(), usize::from(expect), "name: {}", name);
    }
}

#[test]
fn deceptively_named_items_are_globally_excluded() {
    let catalog = catalog_of(vec![
        prime_item(
            "Galariak Prime",
            "/Lotus/Weapons/GalariakPrime",
            vec![component("/Lotus/Types/Items/G", "Blade")],
        ),
        prime_item(
            "Sagek Prime",
            "/Lotus/Weapons/SagekPrime",
            vec![component("/Lotus/Types/Items/S", "Hilt")],
        ),
    ]);
    let inventory = inventory_of(&[("/Lotus/Types/Items/G", 3), ("/Lotus/Types/Items/S", 3)]);

    assert!(resolve_owned_components(&inventory, &catalog).is_empty());
}

#[test]
fn non_prime_named_items_are_skipped() {
    let catalog = catalog_of(vec![prime_item(
        "Braton",
        "/Lotus/Weapons/Braton",
        vec![component("/Lotus/Types/Items/X", "Stock")],
    )]);
    let inventory = inventory_of(&[("/Lotus/Types/Items/X", 2)]);

    assert!(resolve_owned_components(&inventory, &catalog).is_empty());
}

#[test]
fn output_is_sorted_and_deterministic() {
    let catalog = catalog_of(vec![
        prime_item(
            "Paris Prime",
            "/Lotus/Weapons/ParisPrime",
            vec![
                component("/Lotus/Types/Items/P2", "String"),
                component("/Lotus/Types/Items/P1", "Grip"),
            ],
        ),
        prime_item(
            "Braton Prime",
            "/Lotus/Weapons/BratonPrime",
            vec![component("/Lotus/Types/Items/B1", "Stock")],
        ),
    ]);
    let inventory = inventory_of(&[
        ("/Lotus/Types/Items/P1", 1),
        ("/Lotus/Types/Items/P2", 2),
        ("/Lotus/Types/Items/B1", 3),
    ]);

    let first = resolve_owned_components(&inventory, &catalog);
    let names: Vec<&str> = first.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Braton Prime Stock", "Paris Prime Grip", "Paris Prime String"]
    );

    // Same inputs, identical output
    let second = resolve_owned_components(&inventory, &catalog);
    assert_eq!(first, second);
}

#[test]
fn category_falls_back_from_index_to_field_to_slot() {
    let mut by_index = prime_item(
        "Volt Prime",
        "/Lotus/Powersuits/VoltPrime",
        vec![component("/Lotus/Types/Items/V", "Chassis")],
    );
    by_index.slot = Some(3);
    let mut by_field = prime_item(
        "Braton Prime",
        "/Lotus/Weapons/BratonPrime",
        vec![component("/Lotus/Types/Items/B", "Stock")],
    );
    by_field.category = Some("Primary".to_string());
    let mut by_slot = prime_item(
        "Lex Prime",
        "/Lotus/Weapons/LexPrime",
        vec![component("/Lotus/Types/Items/L", "Barrel")],
    );
    by_slot.slot = Some(2);

    let mut catalog = catalog_of(vec![by_index, by_field, by_slot]);
    catalog
        .category_index
        .insert("/Lotus/Powersuits/VoltPrime".to_string(), "Warframes".to_string());

    let inventory = inventory_of(&[
        ("/Lotus/Types/Items/V", 1),
        ("/Lotus/Types/Items/B", 1),
        ("/Lotus/Types/Items/L", 1),
    ]);

    let owned = resolve_owned_components(&inventory, &catalog);
    let categories: Vec<&str> = owned.iter().map(|i| i.category.as_str()).collect();
    // Sorted by base name: Braton, Lex, Volt
    assert_eq!(categories, vec!["Primary", "Secondary", "Warframes"]);
}
