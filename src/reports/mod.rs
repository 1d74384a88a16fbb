//! The eleven report generators.
//!
//! Each generator is a pure function from the shared immutable catalog to
//! one output record; none of them mutates state visible to another, so
//! their order here only fixes the artifact listing.

pub mod colors;
pub mod pricing;
pub mod regression;
pub mod style;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::catalog::Catalog;
use crate::output::{Artifact, to_artifact};

/// Runs every generator over the catalog and serializes each result into
/// its named artifact slot.
pub fn run_all(catalog: &Catalog) -> Result<Vec<Artifact>> {
    let artifacts = vec![
        to_artifact("pink_tax.json", &pricing::pink_tax(catalog))?,
        to_artifact("style_gender.json", &style::style_gender(catalog))?,
        to_artifact("palette_gender.json", &colors::palette_gender(catalog))?,
        to_artifact("price_ladder.json", &pricing::price_ladder(catalog))?,
        to_artifact("unisex_tone.json", &style::unisex_tone(catalog))?,
        to_artifact("photos_price.json", &regression::photos_price(catalog))?,
        to_artifact("dress_price.json", &style::dress_price(catalog))?,
        to_artifact("roadster_words.json", &style::brand_words(catalog))?,
        to_artifact("charm_pricing.json", &pricing::charm_pricing(catalog))?,
        to_artifact("color_price_heat.json", &colors::color_price_heat(catalog))?,
        to_artifact("capsule.json", &pricing::capsule(catalog))?,
    ];

    for artifact in &artifacts {
        debug!(name = artifact.name, bytes = artifact.body.len(), "Report generated");
    }

    Ok(artifacts)
}
