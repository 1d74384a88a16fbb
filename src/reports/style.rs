//! Classifier-driven reports: the style-by-gender contingency table, the
//! dress-code price distribution, the unisex tone distribution, and the
//! target-brand keyword frequency table.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::{Catalog, Gender};
use crate::classify::{DressCode, Style, Tone, classify_dress_code, classify_style, classify_tone};
use crate::reports::types::{DressPriceBox, StyleGenderReport, ToneReport, WordCount};
use crate::stats::{chi_squared_test, quantile, round10, round_to};

pub const TARGET_BRAND: &str = "Roadster";
const KEYWORD_LIMIT: usize = 10;
const MIN_TOKEN_LEN: usize = 3;
const P_VALUE_DIGITS: i32 = 4;

const DISPLAY_GENDERS: [&str; 4] = ["Women", "Men", "Unisex", "Kids"];

const STOPWORDS: [&str; 18] = [
    "the", "and", "with", "for", "your", "this", "that", "from", "made", "size", "color",
    "colour", "wash", "design", "fit", "regular", "pack", "set",
];

/// Cross-tabulates the style classifier against gender, folding the kids
/// genders into one bucket, and reports a chi-squared independence p-value.
pub fn style_gender(catalog: &Catalog) -> StyleGenderReport {
    let mut matrix = vec![vec![0u64; Style::ALL.len()]; DISPLAY_GENDERS.len()];

    for row in &catalog.rows {
        let g = fold_gender(row.gender);
        let s = Style::ALL
            .iter()
            .position(|s| *s == classify_style(&row.search_text()))
            .unwrap_or(0);
        matrix[g][s] += 1;
    }

    let p_value = chi_squared_test(&matrix).map(|p| round_to(p, P_VALUE_DIGITS));
    if p_value.is_none() {
        warn!("Style contingency matrix is degenerate, omitting p-value");
    }

    StyleGenderReport {
        genders: DISPLAY_GENDERS.to_vec(),
        styles: Style::ALL.iter().map(|s| s.label()).collect(),
        matrix,
        p_value,
    }
}

fn fold_gender(gender: Gender) -> usize {
    match gender {
        Gender::Women => 0,
        Gender::Men => 1,
        Gender::Unisex => 2,
        Gender::Boys | Gender::Girls | Gender::UnisexKids => 3,
    }
}

/// Five-number price summary per dress-code category, in the fixed category
/// order. Categories with no matching rows are omitted.
pub fn dress_price(catalog: &Catalog) -> Vec<DressPriceBox> {
    let mut by_code: HashMap<DressCode, Vec<f64>> = HashMap::new();
    for row in &catalog.rows {
        by_code
            .entry(classify_dress_code(&row.search_text()))
            .or_default()
            .push(row.price as f64);
    }

    DressCode::ALL
        .iter()
        .filter_map(|code| {
            let mut prices = by_code.remove(code)?;
            prices.sort_by(|a, b| a.total_cmp(b));
            let q = |p: f64| round10(quantile(&prices, p).unwrap_or(0.0));
            Some(DressPriceBox {
                code: code.label(),
                min: q(0.0),
                q1: q(0.25),
                median: q(0.5),
                q3: q(0.75),
                max: q(1.0),
            })
        })
        .collect()
}

/// Tone label counts over rows whose gender is Unisex or Unisex Kids.
pub fn unisex_tone(catalog: &Catalog) -> ToneReport {
    let mut report = ToneReport {
        neutral: 0,
        masculine: 0,
        feminine: 0,
    };

    for row in catalog.rows.iter().filter(|r| r.gender.is_unisex()) {
        match classify_tone(&row.search_text()) {
            Tone::Neutral => report.neutral += 1,
            Tone::Masculine => report.masculine += 1,
            Tone::Feminine => report.feminine += 1,
        }
    }

    report
}

/// Token frequency over the target brand's product copy: lower-cased,
/// split on non-alphabetic boundaries, short tokens and stop-words removed.
/// Top 10 by count, count ties broken by first occurrence.
pub fn brand_words(catalog: &Catalog) -> Vec<WordCount> {
    let text = catalog
        .rows
        .iter()
        .filter(|r| r.brand.eq_ignore_ascii_case(TARGET_BRAND))
        .map(|r| r.search_text())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        warn!(brand = TARGET_BRAND, "No rows matched the target brand");
        return Vec::new();
    }

    // (count, first-occurrence index) per token
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (i, token) in text
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t))
        .enumerate()
    {
        let entry = counts.entry(token).or_insert((0, i));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (u64, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
    ranked.truncate(KEYWORD_LIMIT);

    ranked
        .into_iter()
        .map(|(word, (count, _))| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}
