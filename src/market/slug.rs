//! Slug derivation for warframe.market item lookups

/// Derive the marketplace lookup slug for a display name.
///
/// Lowercases, trims, rewrites `&` to `and`, collapses whitespace runs to
/// single underscores and strips everything outside `[a-z0-9_]`. Pure and
/// idempotent: slugging a slug returns it unchanged.
///
/// One upstream quirk is baked in: the market spells the Kompressa receiver
/// "reciever", so that slug keeps the misspelling.
pub fn item_name_to_slug(item_name: &str) -> String {
    let lowered = item_name.to_lowercase();
    let replaced = lowered.trim().replace('&', "and");

    let mut slug = replaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect::<String>();

    if slug.contains("kompressa") && slug.contains("receiver") {
        slug = slug.replace("receiver", "reciever");
    }

    slug
}

/// Slug variations to try in order for a display name.
///
/// The primary slug always comes first. Prime warframe body parts
/// (neuroptics/chassis/systems) are listed on the market under an alternate
/// `<warframe>_prime_<part>_blueprint` slug, so one such variant is appended
/// when the name warrants it.
pub fn slug_variations(item_name: &str) -> Vec<String> {
    const SUB_PARTS: &[&str] = &["neuroptics", "chassis", "systems"];

    let base_slug = item_name_to_slug(item_name);
    let item_lower = item_name.to_lowercase();
    let mut variations = vec![base_slug.clone()];

    if item_lower.contains("prime") {
        if let Some(part) = SUB_PARTS.iter().find(|p| item_lower.contains(*p)) {
            let parts: Vec<&str> = base_slug.split('_').collect();
            if let Some(prime_idx) = parts.iter().position(|p| *p == "prime") {
                if prime_idx > 0 {
                    let warframe = parts[prime_idx - 1];
                    let variant = format!("{}_prime_{}_blueprint", warframe, part);
                    if !variations.contains(&variant) {
                        variations.push(variant);
                    }
                }
            }
        }
    }

    variations
}
