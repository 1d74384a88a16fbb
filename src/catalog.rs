//! Catalog loading and normalization.
//!
//! Reads the flat product CSV into the canonical in-memory table shared by
//! every report generator. Rows that fail coercion are dropped and counted;
//! a missing required column aborts the whole run.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Fatal loader failures. Anything here aborts the run before any report
/// artifact is written.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open catalog source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog source is missing required column '{0}'")]
    MissingColumn(String),
}

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "ProductName",
    "Description",
    "ProductBrand",
    "Gender",
    "PrimaryColor",
    "Price",
    "NumImages",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Women,
    Men,
    Unisex,
    Boys,
    Girls,
    UnisexKids,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Women" => Some(Gender::Women),
            "Men" => Some(Gender::Men),
            "Unisex" => Some(Gender::Unisex),
            "Boys" => Some(Gender::Boys),
            "Girls" => Some(Gender::Girls),
            "Unisex Kids" => Some(Gender::UnisexKids),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Women => "Women",
            Gender::Men => "Men",
            Gender::Unisex => "Unisex",
            Gender::Boys => "Boys",
            Gender::Girls => "Girls",
            Gender::UnisexKids => "Unisex Kids",
        }
    }

    /// Both "Unisex" and "Unisex Kids".
    pub fn is_unisex(&self) -> bool {
        matches!(self, Gender::Unisex | Gender::UnisexKids)
    }
}

/// One normalized product row. Color is trimmed and lower-cased; price keeps
/// its raw integer value so that price-string patterns (e.g. charm pricing)
/// survive — rounding to the nearest 10 happens per report where specified.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub gender: Gender,
    pub primary_color: String,
    pub price: i64,
    pub num_images: u32,
}

impl CatalogRow {
    /// The lower-cased text every classifier searches: name + " " + description.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}

/// The full normalized table. Immutable once loaded; generators only read it.
#[derive(Debug, Default)]
pub struct Catalog {
    pub rows: Vec<CatalogRow>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn distinct_brands(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.brand.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Raw CSV record, all fields optional strings so that a single bad cell
/// drops one row instead of failing the whole read.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "ProductName")]
    product_name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "ProductBrand")]
    product_brand: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "PrimaryColor")]
    primary_color: Option<String>,
    #[serde(rename = "Price")]
    price: Option<String>,
    #[serde(rename = "NumImages")]
    num_images: Option<String>,
}

/// Loads and normalizes the catalog CSV.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the file cannot be opened, the CSV cannot be
/// read at all, or a required column is absent from the header.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, DataLoadError> {
    let file = File::open(path.as_ref())?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataLoadError::MissingColumn(col.to_string()));
        }
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        match normalize_record(record) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped rows that failed coercion");
    }

    Ok(Catalog { rows })
}

/// Applies the normalization rules in order: trim + lower-case the color,
/// coerce gender/price/num_images, treat a missing description as empty.
/// Returns `None` when any coercion fails or the price is negative.
fn normalize_record(record: RawRecord) -> Option<CatalogRow> {
    let name = record.product_name?;
    let brand = record.product_brand?;
    let gender = Gender::parse(record.gender.as_deref()?)?;

    let primary_color = record
        .primary_color
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_default();

    // Accept integer or float renderings of the numeric columns.
    let price = parse_integer(record.price.as_deref()?)?;
    if price < 0 {
        return None;
    }
    let num_images = u32::try_from(parse_integer(record.num_images.as_deref()?)?).ok()?;

    Some(CatalogRow {
        name,
        description: record.description.unwrap_or_default(),
        brand,
        gender,
        primary_color,
        price,
        num_images,
    })
}

fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64)
}
