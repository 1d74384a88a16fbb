//! Output record types for the report generators.
//!
//! Each struct is one self-contained JSON artifact shape consumed by the
//! visualization layer; key names and array orderings are part of the
//! contract and must not change.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Mean-price comparison between Women/pink and Men/blue subsets.
/// Undefined quantities (empty or degenerate subsets) serialize as null.
#[derive(Debug, Serialize)]
pub struct PinkTaxReport {
    pub women_mean: Option<i64>,
    pub men_mean: Option<i64>,
    pub p_value: Option<f64>,
}

/// Gender-by-style contingency matrix; rows follow `genders`, columns
/// follow `styles`.
#[derive(Debug, Serialize)]
pub struct StyleGenderReport {
    pub genders: Vec<&'static str>,
    pub styles: Vec<&'static str>,
    pub matrix: Vec<Vec<u64>>,
    pub p_value: Option<f64>,
}

/// One top-color entry with per-gender counts, in overall frequency order.
#[derive(Debug, Serialize)]
pub struct PaletteEntry {
    pub color: String,
    pub men: u64,
    pub women: u64,
}

/// One rung of the brand price ladder.
#[derive(Debug, Serialize)]
pub struct BrandRung {
    pub brand: String,
    pub median_price: i64,
}

/// Tone label counts over the unisex subset, keys in display order.
#[derive(Debug, Serialize)]
pub struct ToneReport {
    #[serde(rename = "Neutral")]
    pub neutral: u64,
    #[serde(rename = "Masculine")]
    pub masculine: u64,
    #[serde(rename = "Feminine")]
    pub feminine: u64,
}

/// Regression fit over the full catalog plus a seeded scatter sample of
/// `[num_images, price]` pairs.
#[derive(Debug, Serialize)]
pub struct PhotosPriceReport {
    pub points: Vec<[i64; 2]>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
}

/// Five-number price summary for one dress-code category.
#[derive(Debug, Serialize)]
pub struct DressPriceBox {
    pub code: &'static str,
    pub min: i64,
    pub q1: i64,
    pub median: i64,
    pub q3: i64,
    pub max: i64,
}

/// One keyword-frequency entry for the target brand's copy.
#[derive(Debug, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Counts of charm-priced rows (price string ending in "99") vs the rest.
#[derive(Debug, Serialize)]
pub struct CharmPricingReport {
    pub ending_99: u64,
    pub other: u64,
}

/// Color-by-price-bucket count matrix; rows follow `colors`, columns
/// follow `buckets`.
#[derive(Debug, Serialize)]
pub struct ColorPriceHeatReport {
    pub colors: Vec<String>,
    pub buckets: Vec<&'static str>,
    pub matrix: Vec<Vec<u64>>,
}

/// One display row of the capsule wardrobe table.
#[derive(Debug, Serialize)]
pub struct CapsuleItem {
    pub brand: String,
    pub name: String,
    pub price: i64,
    pub color: String,
    pub gender: &'static str,
}

/// Run summary written last, after every artifact has been serialized.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub rows: u64,
    pub brands: u64,
    pub generated: String,
    pub files: BTreeMap<String, u64>,
}

impl Manifest {
    pub fn new(rows: u64, brands: u64, generated_at: DateTime<Utc>) -> Self {
        Manifest {
            rows,
            brands,
            generated: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            files: BTreeMap::new(),
        }
    }
}
