//! Catalog accessor
//!
//! Reads a product's part set out of the storage capability into typed
//! [`Part`]s: full spec map, assembly memberships, and stored embedding.
//! Malformed records are skipped, never fatal; storage failures propagate
//! unmodified.

use ahash::AHashSet;
use serde_json::Value;
use tracing::debug;

use compatx_core::{Embedding, GraphStore, Part, ReadQuery, Result, Row, SpecValue};

/// Fetch every part reachable from the named product, deduplicated by
/// `part_id` (first occurrence wins). Rows without a usable part id are
/// dropped from the working set.
pub fn fetch_parts_for_product(store: &dyn GraphStore, product: &str) -> Result<Vec<Part>> {
    let rows = store.read(ReadQuery::PartsForProduct { product })?;

    let mut parts = Vec::new();
    let mut seen: AHashSet<String> = AHashSet::new();

    for row in &rows {
        let Some(part) = decode_row(row) else {
            debug!("Skipping part row without a usable part_id");
            continue;
        };
        if !seen.insert(part.part_id.clone()) {
            continue;
        }
        parts.push(part);
    }

    Ok(parts)
}

fn decode_row(row: &Row) -> Option<Part> {
    let props = row.get("part")?;
    let part_id = props
        .get("part_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;

    let name = props
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let category = props
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or("Uncategorized");

    let mut part = Part::new(part_id, name, category);

    if let Some(description) = props.get("description").and_then(Value::as_str) {
        part.description = Some(description.to_string());
    }

    if let Some(embedding) = props.get("embedding") {
        part.embedding = serde_json::from_value::<Vec<f32>>(embedding.clone())
            .ok()
            .map(Embedding::new);
    }

    if let Some(assemblies) = row.get("assemblies").and_then(Value::as_array) {
        part.assemblies = assemblies
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(specs) = row.get("specs").and_then(Value::as_array) {
        for spec in specs {
            let Some(key) = spec.get("key").and_then(Value::as_str).filter(|k| !k.is_empty())
            else {
                continue;
            };
            let value = spec.get("value").cloned().unwrap_or(Value::Null);
            let unit = spec.get("unit").and_then(Value::as_str).unwrap_or_default();
            part.specs.insert(key.to_string(), SpecValue::new(value, unit));
        }
    }

    Some(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compatx_store::MemoryGraph;
    use serde_json::json;

    #[test]
    fn test_fetch_decodes_full_part() {
        let store = MemoryGraph::new();
        store.insert_raw_part(
            "Lathe-X",
            json!({
                "part_id": "P-001",
                "name": "Spindle bearing",
                "category": "Bearings",
                "description": "Deep groove ball bearing",
                "embedding": [0.5, 0.5],
            }),
            vec![
                json!({"key": "diameter", "value": 16, "unit": "mm"}),
                json!({"key": "material", "value": "steel", "unit": ""}),
            ],
            vec!["Spindle Assembly".to_string()],
        );

        let parts = fetch_parts_for_product(&store, "Lathe-X").unwrap();
        assert_eq!(parts.len(), 1);

        let part = &parts[0];
        assert_eq!(part.part_id, "P-001");
        assert_eq!(part.category, "Bearings");
        assert_eq!(part.description.as_deref(), Some("Deep groove ball bearing"));
        assert_eq!(part.specs.get("diameter").unwrap().as_number(), Some(16.0));
        assert_eq!(part.assemblies, vec!["Spindle Assembly"]);
        assert_eq!(part.embedding.as_ref().unwrap().dim(), 2);
    }

    #[test]
    fn test_malformed_parts_are_skipped() {
        let store = MemoryGraph::new();
        store.insert_raw_part("Lathe-X", json!({"name": "No id"}), vec![], vec![]);
        store.insert_raw_part("Lathe-X", json!({"part_id": ""}), vec![], vec![]);
        store.insert_raw_part("Lathe-X", json!({"part_id": "P-002"}), vec![], vec![]);

        let parts = fetch_parts_for_product(&store, "Lathe-X").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].part_id, "P-002");
    }

    #[test]
    fn test_duplicate_part_ids_deduplicated() {
        let store = MemoryGraph::new();
        store.insert_raw_part(
            "Lathe-X",
            json!({"part_id": "P-001", "name": "First"}),
            vec![],
            vec![],
        );
        store.insert_raw_part(
            "Lathe-X",
            json!({"part_id": "P-001", "name": "Second"}),
            vec![],
            vec![],
        );

        let parts = fetch_parts_for_product(&store, "Lathe-X").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "First");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let store = MemoryGraph::new();
        store.insert_raw_part("Lathe-X", json!({"part_id": "P-003"}), vec![], vec![]);

        let parts = fetch_parts_for_product(&store, "Lathe-X").unwrap();
        let part = &parts[0];
        assert_eq!(part.name, "");
        assert_eq!(part.category, "Uncategorized");
        assert!(part.description.is_none());
        assert!(part.embedding.is_none());
        assert!(part.specs.is_empty());
    }

    #[test]
    fn test_empty_assembly_names_dropped() {
        let store = MemoryGraph::new();
        store.insert_raw_part(
            "Lathe-X",
            json!({"part_id": "P-004"}),
            vec![json!({"key": "", "value": 1})],
            vec!["".to_string(), "Z Axis Assembly".to_string()],
        );

        let parts = fetch_parts_for_product(&store, "Lathe-X").unwrap();
        let part = &parts[0];
        assert_eq!(part.assemblies, vec!["Z Axis Assembly"]);
        // Keyless spec entries are dropped too.
        assert!(part.specs.is_empty());
    }

    #[test]
    fn test_unknown_product_yields_empty_set() {
        let store = MemoryGraph::new();
        let parts = fetch_parts_for_product(&store, "Missing").unwrap();
        assert!(parts.is_empty());
    }
}
