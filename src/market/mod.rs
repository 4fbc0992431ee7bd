//! warframe.market API client
//!
//! One read-only endpoint is used: the open orders for an item slug. Every
//! failure mode of a single lookup — timeout, DNS, 404, error payload,
//! malformed body, no visible sell orders — collapses to "no price"; pricing
//! one item must never abort pricing the rest.

mod aggregate;
mod slug;

pub use aggregate::reasonable_price;
pub use slug::{item_name_to_slug, slug_variations};

use serde::Deserialize;
use std::time::Duration;

const ORDERS_URL: &str = "https://api.warframe.market/v2/orders/item";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = "ducat_tally/1.0";

/// Top-level orders response; `data` carries the orders either directly or
/// nested under a payload, depending on the endpoint version
#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub data: Option<OrdersData>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersData {
    Orders(Vec<Order>),
    Nested { payload: OrdersPayload },
}

#[derive(Debug, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// A single marketplace order
#[derive(Debug, Deserialize)]
pub struct Order {
    #[serde(rename = "type", default)]
    pub order_type: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub platinum: u32,
}

fn default_visible() -> bool {
    true
}

impl OrdersResponse {
    /// Visible sell-order prices, positive values only
    pub fn sell_prices(&self) -> Vec<u32> {
        if self.error.as_ref().is_some_and(is_truthy) {
            return Vec::new();
        }
        let orders = match &self.data {
            Some(OrdersData::Orders(orders)) => orders,
            Some(OrdersData::Nested { payload }) => &payload.orders,
            None => return Vec::new(),
        };
        orders
            .iter()
            .filter(|o| o.order_type == "sell" && o.visible && o.platinum > 0)
            .map(|o| o.platinum)
            .collect()
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        _ => true,
    }
}

/// Build the shared HTTP client with the per-request timeout baked in
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch and aggregate the price for one slug; any failure is "no price"
pub async fn fetch_price_for_slug(client: &reqwest::Client, slug: &str) -> Option<u32> {
    let url = format!("{}/{}", ORDERS_URL, slug);
    log::debug!("Fetching orders: {}", url);

    let response = match client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Request for {} failed: {}", slug, e);
            return None;
        }
    };

    if !response.status().is_success() {
        log::debug!("HTTP {} for {}", response.status(), slug);
        return None;
    }

    let body: OrdersResponse = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Malformed orders body for {}: {}", slug, e);
            return None;
        }
    };

    let prices = body.sell_prices();
    if prices.is_empty() {
        return None;
    }
    reasonable_price(&prices)
}

/// Fetch the price for a display name, trying the primary slug first and
/// then each alternate slug variation. Returns the first success.
pub async fn fetch_item_price(client: &reqwest::Client, item_name: &str) -> Option<u32> {
    for slug in slug_variations(item_name) {
        if slug.is_empty() {
            continue;
        }
        if let Some(price) = fetch_price_for_slug(client, &slug).await {
            return Some(price);
        }
    }
    None
}

#[cfg(test)]
#[path = "market_tests.rs"]
mod tests;
