//! Color-focused reports: the per-gender palette of the most frequent
//! colors and the color-by-price-bucket heatmap. Both share one top-color
//! selection so their row orders always agree.

use std::collections::HashMap;

use crate::catalog::{Catalog, Gender};
use crate::reports::types::{ColorPriceHeatReport, PaletteEntry};

pub const TOP_COLOR_LIMIT: usize = 10;

/// Right-open price bins; the last bucket is unbounded above.
const PRICE_BINS: [(&str, i64, i64); 6] = [
    ("<500", 0, 500),
    ("500-999", 500, 1000),
    ("1000-1499", 1000, 1500),
    ("1500-1999", 1500, 2000),
    ("2000-2999", 2000, 3000),
    (">=3000", 3000, i64::MAX),
];

/// The `limit` most frequent normalized colors, frequency-descending,
/// frequency ties broken by the color's natural string order. Rows with an
/// empty color are ignored.
pub fn top_colors(catalog: &Catalog, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in &catalog.rows {
        if !row.primary_color.is_empty() {
            *counts.entry(&row.primary_color).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(color, _)| color.to_string())
        .collect()
}

/// Women/Men row counts for each of the overall top-10 colors, preserving
/// the frequency-descending color order.
pub fn palette_gender(catalog: &Catalog) -> Vec<PaletteEntry> {
    top_colors(catalog, TOP_COLOR_LIMIT)
        .into_iter()
        .map(|color| {
            let count = |gender: Gender| {
                catalog
                    .rows
                    .iter()
                    .filter(|r| r.gender == gender && r.primary_color == color)
                    .count() as u64
            };
            PaletteEntry {
                men: count(Gender::Men),
                women: count(Gender::Women),
                color,
            }
        })
        .collect()
}

/// Row counts per (top-10 color, price bucket) cell, in the declared color
/// and bucket orders.
pub fn color_price_heat(catalog: &Catalog) -> ColorPriceHeatReport {
    let colors = top_colors(catalog, TOP_COLOR_LIMIT);
    let index: HashMap<&str, usize> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut matrix = vec![vec![0u64; PRICE_BINS.len()]; colors.len()];
    for row in &catalog.rows {
        if let Some(&i) = index.get(row.primary_color.as_str()) {
            matrix[i][bucket_of(row.price)] += 1;
        }
    }

    ColorPriceHeatReport {
        colors,
        buckets: PRICE_BINS.iter().map(|(label, _, _)| *label).collect(),
        matrix,
    }
}

fn bucket_of(price: i64) -> usize {
    PRICE_BINS
        .iter()
        .position(|&(_, lo, hi)| price >= lo && price < hi)
        .unwrap_or(PRICE_BINS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRow;

    fn row(gender: Gender, color: &str, price: i64) -> CatalogRow {
        CatalogRow {
            name: "item".to_string(),
            description: String::new(),
            brand: "B".to_string(),
            gender,
            primary_color: color.to_string(),
            price,
            num_images: 0,
        }
    }

    fn color_runs(runs: &[(&str, usize)]) -> Catalog {
        let mut rows = Vec::new();
        for &(color, n) in runs {
            for _ in 0..n {
                rows.push(row(Gender::Men, color, 100));
            }
        }
        Catalog { rows }
    }

    #[test]
    fn test_top_colors_scenario() {
        let c = color_runs(&[("red", 5), ("blue", 3), ("green", 1)]);
        assert_eq!(top_colors(&c, 2), ["red", "blue"]);
    }

    #[test]
    fn test_top_colors_tie_breaks_by_name() {
        let c = color_runs(&[("mauve", 2), ("beige", 2), ("red", 3)]);
        assert_eq!(top_colors(&c, 3), ["red", "beige", "mauve"]);
    }

    #[test]
    fn test_top_colors_skips_empty() {
        let c = color_runs(&[("", 9), ("red", 1)]);
        assert_eq!(top_colors(&c, 10), ["red"]);
    }

    #[test]
    fn test_palette_counts_per_gender() {
        let c = Catalog {
            rows: vec![
                row(Gender::Men, "blue", 100),
                row(Gender::Men, "blue", 100),
                row(Gender::Women, "blue", 100),
                row(Gender::Unisex, "blue", 100),
            ],
        };
        let palette = palette_gender(&c);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].color, "blue");
        assert_eq!(palette[0].men, 2);
        assert_eq!(palette[0].women, 1);
    }

    #[test]
    fn test_bucket_edges_are_right_open() {
        assert_eq!(bucket_of(0), 0);
        assert_eq!(bucket_of(499), 0);
        assert_eq!(bucket_of(500), 1);
        assert_eq!(bucket_of(999), 1);
        assert_eq!(bucket_of(1500), 3);
        assert_eq!(bucket_of(2999), 4);
        assert_eq!(bucket_of(3000), 5);
        assert_eq!(bucket_of(99_999), 5);
    }

    #[test]
    fn test_heatmap_matrix_orders_and_counts() {
        let c = Catalog {
            rows: vec![
                row(Gender::Men, "red", 450),
                row(Gender::Men, "red", 450),
                row(Gender::Men, "red", 3200),
                row(Gender::Women, "blue", 700),
            ],
        };
        let heat = color_price_heat(&c);
        assert_eq!(heat.colors, ["red", "blue"]);
        assert_eq!(heat.buckets.len(), 6);
        assert_eq!(heat.matrix[0][0], 2);
        assert_eq!(heat.matrix[0][5], 1);
        assert_eq!(heat.matrix[1][1], 1);

        let total: u64 = heat.matrix.iter().flatten().sum();
        assert_eq!(total, 4);
    }
}
