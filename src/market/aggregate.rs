//! Robust sell-price aggregation
//!
//! A naive mean or median of open sell orders is skewed by lowball undercut
//! listings, so prices are filtered before taking the median and the reported
//! price is an actual listing, not a synthetic midpoint.

/// Pick the most representative price from a list of sell prices.
///
/// Sorts ascending, then repeatedly drops the lower element of the first
/// adjacent pair where `lower < upper / 2`, restarting the scan after every
/// removal. If that filtering discarded more than 75% of the listings it is
/// reverted wholesale. The result is the remaining element closest to the
/// remaining list's median; a distance tie goes to the smaller price.
pub fn reasonable_price(prices: &[u32]) -> Option<u32> {
    if prices.is_empty() {
        return None;
    }

    let mut sorted: Vec<u32> = prices.to_vec();
    sorted.sort_unstable();

    let mut filtered = sorted.clone();
    let mut changed = true;
    while changed && filtered.len() > 1 {
        changed = false;
        for i in 0..filtered.len() - 1 {
            if (filtered[i] as f64) < filtered[i + 1] as f64 / 2.0 {
                filtered.remove(i);
                changed = true;
                break;
            }
        }
    }

    // 25% retention floor: a cascade that ate most of the list means the
    // list itself was the outlier pattern, so fall back to the full data
    if (filtered.len() as f64) < (sorted.len() as f64 * 0.25).max(1.0) {
        filtered = sorted;
    }

    let n = filtered.len();
    let median = if n % 2 == 0 {
        (filtered[n / 2 - 1] as f64 + filtered[n / 2] as f64) / 2.0
    } else {
        filtered[n / 2] as f64
    };

    let mut best_price = None;
    let mut min_distance = f64::INFINITY;
    for &price in &filtered {
        let distance = (price as f64 - median).abs();
        if distance < min_distance
            || (distance == min_distance && Some(price) < best_price)
        {
            min_distance = distance;
            best_price = Some(price);
        }
    }

    best_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_price() {
        assert_eq!(reasonable_price(&[]), None);
    }

    #[test]
    fn single_listing_is_its_own_price() {
        assert_eq!(reasonable_price(&[5]), Some(5));
    }

    #[test]
    fn lowball_undercut_is_dropped() {
        // 2 is less than half of 10, so it goes; median of [10, 11, 12] is 11
        assert_eq!(reasonable_price(&[2, 10, 11, 12]), Some(11));
    }

    #[test]
    fn cascading_removal_restarts_from_the_front() {
        // 4 goes against 9, which then exposes 3 as a lowball too
        assert_eq!(reasonable_price(&[3, 4, 9, 10, 11]), Some(10));
    }

    #[test]
    fn retention_floor_reverts_a_runaway_cascade() {
        // The cascade would leave only [100] (1 of 5 < 25%), so filtering is
        // reverted and the full list's median-nearest value wins
        assert_eq!(reasonable_price(&[1, 1, 1, 1, 100]), Some(1));
    }

    #[test]
    fn exact_quarter_retention_is_kept() {
        // [10, 11, 12, 500] cascades down to [500]; 1 of 4 is exactly the
        // 25% floor, which counts as retained
        assert_eq!(reasonable_price(&[10, 12, 11, 500]), Some(500));
    }

    #[test]
    fn even_length_median_tie_prefers_the_smaller_price() {
        // median of [10, 20] is 15; both are 5 away
        assert_eq!(reasonable_price(&[20, 10]), Some(10));
    }

    #[test]
    fn dense_spread_is_untouched() {
        assert_eq!(reasonable_price(&[40, 42, 44, 45, 50]), Some(44));
    }
}
