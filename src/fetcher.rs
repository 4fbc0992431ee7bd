//! Rate-limited batch price fetching
//!
//! A batch job prices a whole resolved-inventory list in one background
//! task. The task is the only place network waits and sleeps happen; results
//! and progress cross back to the caller over a channel, never by mutating
//! foreground state. At most one job runs at a time; starting a second one
//! while the first is active is a silent no-op.

use crate::market::{fetch_price_for_slug, slug_variations};
use crate::price_cache::{epoch_now, PriceCache};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{sleep, Duration, Instant};

/// Hard ceiling the upstream API tolerates
const MAX_REQUESTS_PER_WINDOW: u32 = 3;
const WINDOW: Duration = Duration::from_secs(1);
/// Unconditional pause between consecutive items
const INTER_ITEM_DELAY: Duration = Duration::from_millis(333);

/// How often progress and partial-refresh notifications go out
const PROGRESS_EVERY: usize = 20;
const REFRESH_EVERY: usize = 25;

/// Notifications emitted by a running fetch job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Started { total: usize },
    Progress { fetched: usize, processed: usize, total: usize },
    /// Enough new prices have landed to be worth re-rendering
    Refresh,
    Completed { fetched: usize },
}

/// Counter-reset rate limiter: at most `MAX_REQUESTS_PER_WINDOW` requests
/// per window, the counter resetting once the window elapses
struct RateLimiter {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    fn new() -> Self {
        Self {
            count: 0,
            window_start: Instant::now(),
        }
    }

    /// Wait until the next request is allowed, then account for it
    async fn acquire(&mut self) {
        if self.count >= MAX_REQUESTS_PER_WINDOW {
            let elapsed = self.window_start.elapsed();
            if elapsed < WINDOW {
                sleep(WINDOW - elapsed).await;
            }
            self.count = 0;
            self.window_start = Instant::now();
        }
        self.count += 1;
    }
}

/// Single-slot supervisor for background price-fetch jobs.
///
/// The cache behind the mutex is single-writer during a job: only the worker
/// writes, the foreground only reads.
pub struct PriceFetcher {
    cache: Arc<Mutex<PriceCache>>,
    client: reqwest::Client,
    in_progress: Arc<AtomicBool>,
}

impl PriceFetcher {
    pub fn new(cache: Arc<Mutex<PriceCache>>) -> Self {
        Self {
            cache,
            client: crate::market::build_client(),
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cache(&self) -> Arc<Mutex<PriceCache>> {
        Arc::clone(&self.cache)
    }

    /// Claim the single job slot; false when a job is already running
    fn try_begin(&self) -> bool {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Start a background job pricing `display_names`.
    ///
    /// Returns false (and does nothing) when a job is already running. The
    /// job emits [`FetchEvent`]s on `events` and flushes the cache once at
    /// completion; there is no way to cancel it.
    pub fn spawn_fetch(
        &self,
        display_names: Vec<String>,
        force_refresh: bool,
        events: UnboundedSender<FetchEvent>,
    ) -> bool {
        if !self.try_begin() {
            log::debug!("Price fetch already in progress, ignoring request");
            return false;
        }

        let cache = Arc::clone(&self.cache);
        let client = self.client.clone();
        let in_progress = Arc::clone(&self.in_progress);

        tokio::spawn(async move {
            run_job(cache, client, display_names, force_refresh, events).await;
            in_progress.store(false, Ordering::Release);
        });
        true
    }
}

/// Names whose cache entry is stale or absent (all of them on force refresh)
fn names_needing_fetch(
    cache: &PriceCache,
    display_names: &[String],
    force_refresh: bool,
    now: i64,
) -> Vec<String> {
    display_names
        .iter()
        .filter(|name| !name.is_empty())
        .filter(|name| force_refresh || cache.fresh_price(name, now).is_none())
        .cloned()
        .collect()
}

async fn run_job(
    cache: Arc<Mutex<PriceCache>>,
    client: reqwest::Client,
    display_names: Vec<String>,
    force_refresh: bool,
    events: UnboundedSender<FetchEvent>,
) {
    let to_fetch = {
        let cache = cache.lock().unwrap();
        names_needing_fetch(&cache, &display_names, force_refresh, epoch_now())
    };

    let total = to_fetch.len();
    if total == 0 {
        let _ = events.send(FetchEvent::Completed { fetched: 0 });
        return;
    }

    log::info!("Fetching {} prices...", total);
    let _ = events.send(FetchEvent::Started { total });

    let mut limiter = RateLimiter::new();
    let mut fetched = 0usize;

    for (idx, name) in to_fetch.iter().enumerate() {
        // Primary slug first, then the alternates; one rate-limit slot per
        // actual outbound request
        let mut price = None;
        for slug in slug_variations(name) {
            if slug.is_empty() {
                continue;
            }
            limiter.acquire().await;
            price = fetch_price_for_slug(&client, &slug).await;
            if price.is_some() {
                break;
            }
        }

        if price.is_some() {
            fetched += 1;
        }
        // Failed lookups are cached too, so the item is not retried until
        // its entry goes stale
        cache.lock().unwrap().put(name, price, epoch_now());

        let processed = idx + 1;
        if processed % PROGRESS_EVERY == 0 {
            let _ = events.send(FetchEvent::Progress {
                fetched,
                processed,
                total,
            });
        }
        if processed % REFRESH_EVERY == 0 {
            let _ = events.send(FetchEvent::Refresh);
        }

        sleep(INTER_ITEM_DELAY).await;
    }

    if let Err(e) = cache.lock().unwrap().save() {
        log::warn!("Failed to save price cache: {}", e);
    }

    log::info!("Fetched {} of {} prices", fetched, total);
    let _ = events.send(FetchEvent::Refresh);
    let _ = events.send(FetchEvent::Completed { fetched });
}
