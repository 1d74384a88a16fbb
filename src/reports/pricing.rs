//! Price-focused reports: pink-tax comparison, charm-pricing prevalence,
//! the brand price ladder, and the capsule wardrobe table.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::{Catalog, Gender};
use crate::reports::types::{BrandRung, CapsuleItem, CharmPricingReport, PinkTaxReport};
use crate::stats::{mean, quantile, round10, round_to, welch_t_test};

const LADDER_BRAND_LIMIT: usize = 20;
const CAPSULE_PRICE_LIMIT: i64 = 1500;
const CAPSULE_ROW_LIMIT: usize = 10;
const CAPSULE_NAME_CHARS: usize = 40;
const P_VALUE_DIGITS: i32 = 4;

/// Compares mean prices of Women/pink rows against Men/blue rows with a
/// Welch two-sample t-test. Empty or degenerate subsets yield nulls rather
/// than aborting the run.
pub fn pink_tax(catalog: &Catalog) -> PinkTaxReport {
    let women: Vec<f64> = subset_prices(catalog, Gender::Women, "pink");
    let men: Vec<f64> = subset_prices(catalog, Gender::Men, "blue");

    if women.is_empty() || men.is_empty() {
        warn!(
            women = women.len(),
            men = men.len(),
            "Pink-tax subset empty, emitting nulls"
        );
    }

    PinkTaxReport {
        women_mean: mean_or_none(&women),
        men_mean: mean_or_none(&men),
        p_value: welch_t_test(&women, &men).map(|p| round_to(p, P_VALUE_DIGITS)),
    }
}

fn subset_prices(catalog: &Catalog, gender: Gender, color: &str) -> Vec<f64> {
    catalog
        .rows
        .iter()
        .filter(|r| r.gender == gender && r.primary_color == color)
        .map(|r| r.price as f64)
        .collect()
}

fn mean_or_none(prices: &[f64]) -> Option<i64> {
    if prices.is_empty() {
        None
    } else {
        Some(mean(prices).round() as i64)
    }
}

/// Counts rows whose raw price, written in decimal, ends in "99".
pub fn charm_pricing(catalog: &Catalog) -> CharmPricingReport {
    let ending_99 = catalog
        .rows
        .iter()
        .filter(|r| r.price % 100 == 99)
        .count() as u64;

    CharmPricingReport {
        ending_99,
        other: catalog.len() as u64 - ending_99,
    }
}

/// Median price per brand for the 20 brands with the most rows, sorted
/// descending by median. Count ties and median ties both break by brand
/// name ascending to keep the ordering deterministic.
pub fn price_ladder(catalog: &Catalog) -> Vec<BrandRung> {
    let mut by_brand: HashMap<&str, Vec<f64>> = HashMap::new();
    for row in &catalog.rows {
        by_brand.entry(&row.brand).or_default().push(row.price as f64);
    }

    let mut ranked: Vec<(&str, Vec<f64>)> = by_brand.into_iter().collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));
    ranked.truncate(LADDER_BRAND_LIMIT);

    let mut rungs: Vec<BrandRung> = ranked
        .into_iter()
        .map(|(brand, mut prices)| {
            prices.sort_by(|a, b| a.total_cmp(b));
            // subset is non-empty by construction
            let median = quantile(&prices, 0.5).unwrap_or(0.0);
            BrandRung {
                brand: brand.to_string(),
                median_price: round10(median),
            }
        })
        .collect();

    rungs.sort_by(|a, b| b.median_price.cmp(&a.median_price).then(a.brand.cmp(&b.brand)));
    rungs
}

/// The ten cheapest rows at or under the capsule price threshold, ascending
/// by raw price, with display-rounded prices and truncated names.
pub fn capsule(catalog: &Catalog) -> Vec<CapsuleItem> {
    let mut affordable: Vec<_> = catalog
        .rows
        .iter()
        .filter(|r| r.price <= CAPSULE_PRICE_LIMIT)
        .collect();
    affordable.sort_by_key(|r| r.price);

    affordable
        .into_iter()
        .take(CAPSULE_ROW_LIMIT)
        .map(|r| CapsuleItem {
            brand: r.brand.clone(),
            name: r.name.chars().take(CAPSULE_NAME_CHARS).collect(),
            price: round10(r.price as f64),
            color: r.primary_color.clone(),
            gender: r.gender.as_str(),
        })
        .collect()
}
