//! JSON catalog ingestion
//!
//! Loads a catalog file of the form
//! `{ "product": { "name": ... }, "parts": [ ... ] }` into a store. Part
//! embeddings are computed at ingest time from the part's name, description,
//! and spec text. Parts that name no assembly fall back to the static
//! category-to-assembly map, so ingestion and virtual-part ranking agree on
//! membership.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use compatx_core::{AssemblyMap, Embedder, Error, Part, Result, SpecValue};

use crate::memory::MemoryGraph;

/// A full catalog file: one product and its part tree.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub product: ProductEntry,
    #[serde(default)]
    pub parts: Vec<PartEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
}

/// A part entry; `children` nest sub-parts under the same product.
#[derive(Debug, Clone, Deserialize)]
pub struct PartEntry {
    pub part_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assemblies: Vec<String>,
    #[serde(default)]
    pub specs: Vec<SpecEntry>,
    #[serde(default)]
    pub children: Vec<PartEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecEntry {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub note: String,
}

/// Counts of what an ingest run loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    pub parts: usize,
}

/// Parse a catalog file from disk.
pub fn parse_catalog(path: &Path) -> Result<CatalogFile> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| Error::Serialization(e.to_string()))
}

/// Load a catalog file from disk into the store.
pub fn ingest_file(
    store: &MemoryGraph,
    embedder: &dyn Embedder,
    assembly_map: &AssemblyMap,
    path: &Path,
) -> Result<IngestReport> {
    let catalog = parse_catalog(path)?;
    ingest_catalog(store, embedder, assembly_map, &catalog)
}

/// Load an already-parsed catalog into the store.
pub fn ingest_catalog(
    store: &MemoryGraph,
    embedder: &dyn Embedder,
    assembly_map: &AssemblyMap,
    catalog: &CatalogFile,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    for entry in &catalog.parts {
        ingest_part(
            store,
            embedder,
            assembly_map,
            &catalog.product.name,
            entry,
            &mut report,
        )?;
    }

    info!(
        "Ingested {} parts for product '{}'",
        report.parts, catalog.product.name
    );
    Ok(report)
}

fn ingest_part(
    store: &MemoryGraph,
    embedder: &dyn Embedder,
    assembly_map: &AssemblyMap,
    product: &str,
    entry: &PartEntry,
    report: &mut IngestReport,
) -> Result<()> {
    let embedding = embedder.embed(&embedding_text(entry))?;

    let mut part = Part::new(
        entry.part_id.as_str(),
        entry.name.as_str(),
        entry.category.as_str(),
    )
    .with_embedding(embedding);
    if let Some(description) = &entry.description {
        part = part.with_description(description.as_str());
    }

    if entry.assemblies.is_empty() {
        if let Some(assembly) = assembly_map.assembly_for(&entry.category) {
            part = part.with_assembly(assembly);
        }
    } else {
        part.assemblies = entry.assemblies.clone();
    }

    for spec in &entry.specs {
        part.specs.insert(
            spec.key.clone(),
            SpecValue::new(spec.value.clone(), spec.unit.as_str()),
        );
    }

    store.insert_part(product, &part);
    report.parts += 1;

    for child in &entry.children {
        ingest_part(store, embedder, assembly_map, product, child, report)?;
    }

    Ok(())
}

/// Text a part is embedded from: name, description, and spec key/value pairs.
fn embedding_text(entry: &PartEntry) -> String {
    let specs_text = entry
        .specs
        .iter()
        .map(|s| {
            let value = match &s.value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            format!("{}={}{}", s.key, value, s.unit)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}\n{}\n{}",
        entry.name,
        entry.description.as_deref().unwrap_or(""),
        specs_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashEmbedder;
    use compatx_core::{GraphStore, ReadQuery};
    use std::io::Write as _;

    const CATALOG: &str = r#"{
        "product": { "name": "Lathe-X", "sku": "LX-1000" },
        "parts": [
            {
                "part_id": "P-001",
                "name": "Spindle bearing",
                "category": "Bearings",
                "description": "Deep groove ball bearing",
                "specs": [
                    { "key": "diameter", "value": 16, "unit": "mm" },
                    { "key": "material", "value": "steel" }
                ],
                "children": [
                    {
                        "part_id": "P-001-A",
                        "name": "Bearing seal",
                        "category": "Bearings",
                        "specs": []
                    }
                ]
            },
            {
                "part_id": "P-002",
                "name": "Tailstock quill",
                "category": "Tailstock",
                "assemblies": ["Tailstock Assembly", "Quill Group"]
            }
        ]
    }"#;

    #[test]
    fn test_ingest_counts_nested_children() {
        let store = MemoryGraph::new();
        let embedder = HashEmbedder::new(32);
        let catalog: CatalogFile = serde_json::from_str(CATALOG).unwrap();

        let report =
            ingest_catalog(&store, &embedder, &AssemblyMap::default(), &catalog).unwrap();

        assert_eq!(report.parts, 3);
        assert_eq!(store.part_count("Lathe-X"), 3);
    }

    #[test]
    fn test_assembly_map_fallback_and_explicit_assemblies() {
        let store = MemoryGraph::new();
        let embedder = HashEmbedder::new(32);
        let catalog: CatalogFile = serde_json::from_str(CATALOG).unwrap();
        ingest_catalog(&store, &embedder, &AssemblyMap::default(), &catalog).unwrap();

        let rows = store
            .read(ReadQuery::PartsForProduct { product: "Lathe-X" })
            .unwrap();

        // P-001 named no assembly: falls back to the map entry for Bearings.
        assert_eq!(rows[0]["assemblies"][0], "Spindle Assembly");
        // P-002 named its assemblies explicitly: kept as-is.
        assert_eq!(rows[2]["assemblies"][0], "Tailstock Assembly");
        assert_eq!(rows[2]["assemblies"][1], "Quill Group");
    }

    #[test]
    fn test_parts_get_embeddings_at_ingest() {
        let store = MemoryGraph::new();
        let embedder = HashEmbedder::new(32);
        let catalog: CatalogFile = serde_json::from_str(CATALOG).unwrap();
        ingest_catalog(&store, &embedder, &AssemblyMap::default(), &catalog).unwrap();

        let rows = store
            .read(ReadQuery::PartsForProduct { product: "Lathe-X" })
            .unwrap();
        let embedding = rows[0]["part"]["embedding"].as_array().unwrap();
        assert_eq!(embedding.len(), 32);
    }

    #[test]
    fn test_ingest_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let store = MemoryGraph::new();
        let embedder = HashEmbedder::new(32);
        let report = ingest_file(
            &store,
            &embedder,
            &AssemblyMap::default(),
            file.path(),
        )
        .unwrap();

        assert_eq!(report.parts, 3);
    }

    #[test]
    fn test_malformed_catalog_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let store = MemoryGraph::new();
        let embedder = HashEmbedder::new(32);
        let err = ingest_file(&store, &embedder, &AssemblyMap::default(), file.path())
            .unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
    }
}
