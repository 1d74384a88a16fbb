//! Artifact serialization and the run manifest.
//!
//! Reports are serialized once into in-memory artifacts; the manifest is
//! built from that same collection rather than by re-scanning the output
//! directory, so byte sizes always describe exactly what this run wrote.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::reports::types::Manifest;

pub const MANIFEST_NAME: &str = "meta.json";

/// One serialized report, ready to be written to its output slot.
#[derive(Debug)]
pub struct Artifact {
    pub name: &'static str,
    pub body: Vec<u8>,
}

/// Serializes a report record into a named artifact (compact JSON).
pub fn to_artifact(name: &'static str, value: &impl Serialize) -> Result<Artifact> {
    Ok(Artifact {
        name,
        body: serde_json::to_vec(value)?,
    })
}

/// Writes an artifact into the output directory.
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<()> {
    fs::write(dir.join(artifact.name), &artifact.body)?;
    Ok(())
}

/// Builds the run manifest from the in-memory artifact collection: row and
/// brand counts, the generation timestamp, and each artifact's byte size.
pub fn build_manifest(
    catalog: &Catalog,
    artifacts: &[Artifact],
    generated_at: DateTime<Utc>,
) -> Manifest {
    let mut manifest = Manifest::new(
        catalog.len() as u64,
        catalog.distinct_brands() as u64,
        generated_at,
    );
    for artifact in artifacts {
        manifest
            .files
            .insert(artifact.name.to_string(), artifact.body.len() as u64);
    }
    manifest
}

/// Writes every artifact plus the manifest into `dir`, creating it first.
pub fn write_all(dir: &Path, catalog: &Catalog, artifacts: &[Artifact]) -> Result<()> {
    fs::create_dir_all(dir)?;

    for artifact in artifacts {
        write_artifact(dir, artifact)?;
    }

    let manifest = build_manifest(catalog, artifacts, Utc::now());
    let manifest_artifact = to_artifact(MANIFEST_NAME, &manifest)?;
    write_artifact(dir, &manifest_artifact)?;

    info!(
        dir = %dir.display(),
        artifacts = artifacts.len(),
        "All artifacts written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::env;

    #[test]
    fn test_to_artifact_is_compact_json() {
        let artifact = to_artifact("x.json", &json!({"a": 1, "b": [1, 2]})).unwrap();
        assert_eq!(artifact.body, br#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn test_manifest_sizes_match_bodies() {
        let artifacts = vec![
            to_artifact("a.json", &json!({"k": 1})).unwrap(),
            to_artifact("b.json", &json!([1, 2, 3])).unwrap(),
        ];
        let manifest = build_manifest(&Catalog::default(), &artifacts, Utc::now());

        assert_eq!(manifest.rows, 0);
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files["a.json"], artifacts[0].body.len() as u64);
        assert_eq!(manifest.files["b.json"], artifacts[1].body.len() as u64);
    }

    #[test]
    fn test_manifest_timestamp_has_seconds_precision() {
        let at = "2024-03-01T10:20:30Z".parse::<DateTime<Utc>>().unwrap();
        let manifest = build_manifest(&Catalog::default(), &[], at);
        assert_eq!(manifest.generated, "2024-03-01T10:20:30Z");
    }

    #[test]
    fn test_write_all_creates_dir_and_manifest() {
        let dir = env::temp_dir().join("catalog_insights_output_test");
        let _ = fs::remove_dir_all(&dir);

        let artifacts = vec![to_artifact("a.json", &json!({"k": 1})).unwrap()];
        write_all(&dir, &Catalog::default(), &artifacts).unwrap();

        assert!(dir.join("a.json").exists());
        let meta = fs::read_to_string(dir.join(MANIFEST_NAME)).unwrap();
        assert!(meta.contains("\"a.json\""));

        fs::remove_dir_all(&dir).unwrap();
    }
}
