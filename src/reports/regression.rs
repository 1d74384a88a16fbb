//! Photo-count vs price regression.
//!
//! The least-squares fit always runs over the full catalog; the scatter
//! sample is drawn separately with a fixed seed so repeated runs emit
//! byte-identical artifacts.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::catalog::Catalog;
use crate::reports::types::PhotosPriceReport;
use crate::stats::{linear_fit, round10, round_to};

const SCATTER_SEED: u64 = 42;
const SCATTER_LIMIT: usize = 500;
const SLOPE_DIGITS: i32 = 3;
const INTERCEPT_DIGITS: i32 = 1;

/// Fits price on image count over every row and draws a seeded sample of
/// `[num_images, price]` display points. A degenerate fit (fewer than two
/// rows, or constant image counts) yields null coefficients.
pub fn photos_price(catalog: &Catalog) -> PhotosPriceReport {
    let pairs: Vec<(f64, f64)> = catalog
        .rows
        .iter()
        .map(|r| (r.num_images as f64, r.price as f64))
        .collect();

    let fit = linear_fit(&pairs);
    if fit.is_none() {
        warn!(rows = pairs.len(), "Regression fit degenerate, emitting nulls");
    }

    let mut rng = StdRng::seed_from_u64(SCATTER_SEED);
    let sample_size = SCATTER_LIMIT.min(catalog.len());
    let points = rand::seq::index::sample(&mut rng, catalog.len(), sample_size)
        .into_iter()
        .map(|i| {
            let row = &catalog.rows[i];
            [row.num_images as i64, round10(row.price as f64)]
        })
        .collect();

    PhotosPriceReport {
        points,
        slope: fit.map(|(s, _)| round_to(s, SLOPE_DIGITS)),
        intercept: fit.map(|(_, i)| round_to(i, INTERCEPT_DIGITS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRow, Gender};

    fn row(num_images: u32, price: i64) -> CatalogRow {
        CatalogRow {
            name: "item".to_string(),
            description: String::new(),
            brand: "B".to_string(),
            gender: Gender::Men,
            primary_color: "red".to_string(),
            price,
            num_images,
        }
    }

    #[test]
    fn test_fit_uses_full_catalog() {
        // price = 100 * images + 50, exactly
        let rows: Vec<_> = (0..20).map(|i| row(i, 100 * i as i64 + 50)).collect();
        let report = photos_price(&Catalog { rows });
        assert_eq!(report.slope, Some(100.0));
        assert_eq!(report.intercept, Some(50.0));
        assert_eq!(report.points.len(), 20);
    }

    #[test]
    fn test_sample_is_deterministic_and_capped() {
        let rows: Vec<_> = (0..600).map(|i| row(i % 7, i as i64)).collect();
        let catalog = Catalog { rows };

        let a = photos_price(&catalog);
        let b = photos_price(&catalog);
        assert_eq!(a.points.len(), 500);
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_sample_has_no_duplicate_indices() {
        let rows: Vec<_> = (0..50).map(|i| row(1, i * 100)).collect();
        let report = photos_price(&Catalog { rows });

        let mut prices: Vec<i64> = report.points.iter().map(|p| p[1]).collect();
        prices.sort_unstable();
        prices.dedup();
        assert_eq!(prices.len(), 50);
    }

    #[test]
    fn test_degenerate_fit_yields_nulls() {
        // constant image count
        let rows: Vec<_> = (0..5).map(|i| row(3, 100 + i)).collect();
        let report = photos_price(&Catalog { rows });
        assert_eq!(report.slope, None);
        assert_eq!(report.intercept, None);
        assert_eq!(report.points.len(), 5);
    }

    #[test]
    fn test_empty_catalog() {
        let report = photos_price(&Catalog::default());
        assert_eq!(report.slope, None);
        assert!(report.points.is_empty());
    }
}
