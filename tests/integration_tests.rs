use std::fs;

use serde_json::Value;

use catalog_insights::catalog::load_catalog;
use catalog_insights::output::{build_manifest, write_all};
use catalog_insights::reports::run_all;

const FIXTURE: &str = "tests/fixtures/sample_catalog.csv";

const EXPECTED_ARTIFACTS: [&str; 11] = [
    "pink_tax.json",
    "style_gender.json",
    "palette_gender.json",
    "price_ladder.json",
    "unisex_tone.json",
    "photos_price.json",
    "dress_price.json",
    "roadster_words.json",
    "charm_pricing.json",
    "color_price_heat.json",
    "capsule.json",
];

fn parse(artifacts: &[catalog_insights::output::Artifact], name: &str) -> Value {
    let artifact = artifacts
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("missing artifact {name}"));
    serde_json::from_slice(&artifact.body).unwrap()
}

#[test]
fn test_full_pipeline_on_fixture() {
    let catalog = load_catalog(FIXTURE).expect("fixture should load");
    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.distinct_brands(), 6);

    let artifacts = run_all(&catalog).unwrap();
    let names: Vec<_> = artifacts.iter().map(|a| a.name).collect();
    assert_eq!(names, EXPECTED_ARTIFACTS);

    // Pink tax: Women/pink {1099, 895}, Men/blue {1200, 1300, 199}
    let pink = parse(&artifacts, "pink_tax.json");
    assert_eq!(pink["women_mean"], 997);
    assert_eq!(pink["men_mean"], 900);
    assert!(pink["p_value"].is_f64() || pink["p_value"].is_u64());

    // Contingency conservation: all 12 rows land in exactly one cell
    let style = parse(&artifacts, "style_gender.json");
    let total: u64 = style["matrix"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|r| r.as_array().unwrap())
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 12);
    assert_eq!(style["genders"][3], "Kids");

    // Palette: blue is the most frequent color (3 rows)
    let palette = parse(&artifacts, "palette_gender.json");
    assert_eq!(palette[0]["color"], "blue");
    assert_eq!(palette[0]["men"], 3);
    assert_eq!(palette[0]["women"], 0);

    // Charm pricing conservation: 1099, 399, 2999, 199 end in 99
    let charm = parse(&artifacts, "charm_pricing.json");
    assert_eq!(charm["ending_99"], 4);
    assert_eq!(charm["other"], 8);

    // Unisex tone: the cap's copy scores masculine, the kids tee neutral
    let tone = parse(&artifacts, "unisex_tone.json");
    assert_eq!(tone["Masculine"], 1);
    assert_eq!(tone["Neutral"], 1);
    assert_eq!(tone["Feminine"], 0);

    // Dress boxes are monotone and in the declared category order
    let boxes = parse(&artifacts, "dress_price.json");
    for b in boxes.as_array().unwrap() {
        let v = |k: &str| b[k].as_i64().unwrap();
        assert!(v("min") <= v("q1"));
        assert!(v("q1") <= v("median"));
        assert!(v("median") <= v("q3"));
        assert!(v("q3") <= v("max"));
    }

    // Roadster keywords: "jeans" repeats within one description
    let words = parse(&artifacts, "roadster_words.json");
    assert_eq!(words[0]["word"], "jeans");
    assert_eq!(words[0]["count"], 2);

    // Capsule: 9 rows at or under 1500, cheapest first, display-rounded
    let capsule = parse(&artifacts, "capsule.json");
    assert_eq!(capsule.as_array().unwrap().len(), 9);
    assert_eq!(capsule[0]["price"], 200);
    assert_eq!(capsule[0]["brand"], "Roadster");

    // Heatmap rows cover every catalog color occurrence
    let heat = parse(&artifacts, "color_price_heat.json");
    let heat_total: u64 = heat["matrix"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|r| r.as_array().unwrap())
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(heat_total, 12);

    // Regression artifact carries a sample point per row on small inputs
    let photos = parse(&artifacts, "photos_price.json");
    assert_eq!(photos["points"].as_array().unwrap().len(), 12);
    assert!(photos["slope"].is_f64() || photos["slope"].is_i64());
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let catalog = load_catalog(FIXTURE).unwrap();
    let a = run_all(&catalog).unwrap();
    let b = run_all(&catalog).unwrap();

    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.name, y.name);
        assert_eq!(x.body, y.body, "artifact {} differs between runs", x.name);
    }
}

#[test]
fn test_manifest_lists_every_artifact_with_exact_sizes() {
    let catalog = load_catalog(FIXTURE).unwrap();
    let artifacts = run_all(&catalog).unwrap();
    let manifest = build_manifest(&catalog, &artifacts, chrono::Utc::now());

    assert_eq!(manifest.rows, 12);
    assert_eq!(manifest.brands, 6);
    assert_eq!(manifest.files.len(), EXPECTED_ARTIFACTS.len());
    for artifact in &artifacts {
        assert_eq!(manifest.files[artifact.name], artifact.body.len() as u64);
    }
}

#[test]
fn test_write_all_produces_files_matching_manifest() {
    let dir = std::env::temp_dir().join("catalog_insights_integration");
    let _ = fs::remove_dir_all(&dir);

    let catalog = load_catalog(FIXTURE).unwrap();
    let artifacts = run_all(&catalog).unwrap();
    write_all(&dir, &catalog, &artifacts).unwrap();

    let meta: Value = serde_json::from_slice(&fs::read(dir.join("meta.json")).unwrap()).unwrap();
    for name in EXPECTED_ARTIFACTS {
        let on_disk = fs::metadata(dir.join(name)).unwrap().len();
        assert_eq!(meta["files"][name].as_u64().unwrap(), on_disk);
    }

    fs::remove_dir_all(&dir).unwrap();
}
