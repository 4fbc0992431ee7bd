//! Ducat Tally - Warframe prime-part reconciliation & pricing
//!
//! Loads the inventory export and category catalogs, resolves owned prime
//! parts, prices them against warframe.market and prints a report table.

use clap::Parser;
use ducat_tally::{
    full_trades, load_catalogs, load_inventory, resolve_owned_components, FetchEvent, MarkedItems,
    OwnedComponent, PriceCache, PriceFetcher,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Warframe prime-part tally - reconciles inventory and fetches market prices
#[derive(Parser, Debug)]
#[command(name = "ducat_tally")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding inventory.json and the category catalog files
    #[arg(short, long, default_value = "cachedData")]
    data_dir: PathBuf,

    /// Path to the price cache file
    #[arg(long, default_value_t = default_cache_path())]
    cache_file: String,

    /// Path to the marked-items file (default: marked_items.json in the data dir)
    #[arg(long)]
    marked_file: Option<PathBuf>,

    /// Reconcile and report without fetching any prices
    #[arg(long, default_value_t = false)]
    skip_prices: bool,

    /// Refetch prices even when the cached entry is still fresh
    #[arg(long, default_value_t = false)]
    force_refresh: bool,

    /// Restrict the report to one category (e.g. Warframes, Primary)
    #[arg(long)]
    category: Option<String>,
}

fn default_cache_path() -> String {
    PriceCache::default_path().to_string_lossy().to_string()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting ducat_tally...");
    log::info!("Data directory: {}", args.data_dir.display());

    let inventory = match load_inventory(&args.data_dir.join("inventory.json")) {
        Ok(inventory) => inventory,
        Err(e) => {
            log::error!("Failed to load inventory export: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match load_catalogs(&args.data_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load catalogs: {}", e);
            std::process::exit(1);
        }
    };

    let mut items = resolve_owned_components(&inventory, &catalog);
    if let Some(category) = &args.category {
        items.retain(|item| item.category.eq_ignore_ascii_case(category));
    }
    log::info!("Resolved {} owned components", items.len());

    let marked_file = args
        .marked_file
        .unwrap_or_else(|| args.data_dir.join("marked_items.json"));
    let marked = MarkedItems::load(&marked_file);

    let cache = Arc::new(Mutex::new(PriceCache::load(&PathBuf::from(
        &args.cache_file,
    ))));

    if !args.skip_prices && !items.is_empty() {
        fetch_prices(&cache, &items, args.force_refresh).await;
    }

    print_report(&items, &cache, &marked);
}

/// Run one batch fetch to completion, logging progress as it goes
async fn fetch_prices(
    cache: &Arc<Mutex<PriceCache>>,
    items: &[OwnedComponent],
    force_refresh: bool,
) {
    let fetcher = PriceFetcher::new(Arc::clone(cache));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let names: Vec<String> = items.iter().map(|i| i.display_name.clone()).collect();
    if !fetcher.spawn_fetch(names, force_refresh, tx) {
        return;
    }

    while let Some(event) = rx.recv().await {
        match event {
            FetchEvent::Started { total } => {
                log::info!("Fetching {} prices...", total);
            }
            FetchEvent::Progress {
                fetched,
                processed,
                total,
            } => {
                log::info!("Fetching prices... {}/{} ({} found)", processed, total, fetched);
            }
            FetchEvent::Refresh => {}
            FetchEvent::Completed { fetched } => {
                if fetched > 0 {
                    log::info!("Fetched {} prices", fetched);
                }
                break;
            }
        }
    }
}

fn print_report(items: &[OwnedComponent], cache: &Arc<Mutex<PriceCache>>, marked: &MarkedItems) {
    if items.is_empty() {
        println!("No owned prime components found.");
        return;
    }

    let cache = cache.lock().unwrap();
    let mut current_base = "";

    println!(
        "{:<44} {:>8} {:>8} {:>10}  {}",
        "Item", "Amount", "Ducats", "Platinum", "Status"
    );
    for item in items {
        if item.base_name != current_base {
            current_base = &item.base_name;
            println!("--- {} [{}] ---", item.base_name, item.category);
        }

        let platinum = match cache.get(&item.display_name) {
            Some(entry) => entry
                .price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            None => String::new(),
        };
        let status = if marked.is_marked(&item.display_name, &item.base_name) {
            "MARKED"
        } else {
            ""
        };

        println!(
            "{:<44} {:>8} {:>8} {:>10}  {}",
            item.display_name, item.amount, item.ducats, platinum, status
        );
    }

    let (trades, total) = full_trades(items, marked);
    println!();
    println!("{} full trades ({} unmarked components)", trades, total);
}
