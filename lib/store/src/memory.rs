//! In-memory catalog graph
//!
//! A reference implementation of the storage capability: products, raw part
//! records, and directed compatibility edges held behind a single lock.
//! Part records are stored as raw property maps so that malformed records
//! (for example, missing identifiers) are representable the same way they
//! are in an external store.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde_json::{json, Value};

use compatx_core::{CompatibilityEdge, GraphStore, GraphTxn, Part, ReadQuery, Result, Row};

/// A stored part: raw properties plus attached specs and assembly memberships.
#[derive(Debug, Clone)]
struct PartRecord {
    props: Value,
    specs: Vec<Value>,
    assemblies: Vec<String>,
}

#[derive(Debug, Default)]
struct GraphData {
    next_node_id: u64,
    /// Product name -> node ids of its parts, in insertion order.
    products: AHashMap<String, Vec<u64>>,
    parts: AHashMap<u64, PartRecord>,
    /// Directed edges keyed by (from, to) part ids.
    edges: AHashMap<(String, String), CompatibilityEdge>,
}

/// An in-memory [`GraphStore`].
#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: RwLock<GraphData>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw part record under a product.
    ///
    /// The property map is stored as-is; records without a usable `part_id`
    /// are kept here and skipped later by the catalog accessor.
    pub fn insert_raw_part(
        &self,
        product: &str,
        props: Value,
        specs: Vec<Value>,
        assemblies: Vec<String>,
    ) {
        let mut data = self.inner.write();
        let node_id = data.next_node_id;
        data.next_node_id += 1;
        data.parts.insert(
            node_id,
            PartRecord {
                props,
                specs,
                assemblies,
            },
        );
        data.products
            .entry(product.to_string())
            .or_default()
            .push(node_id);
    }

    /// Insert a typed part under a product.
    pub fn insert_part(&self, product: &str, part: &Part) {
        let mut props = json!({
            "part_id": part.part_id,
            "name": part.name,
            "category": part.category,
        });
        if let Some(description) = &part.description {
            props["description"] = json!(description);
        }
        if let Some(embedding) = &part.embedding {
            props["embedding"] = json!(embedding.as_slice());
        }

        let mut spec_keys: Vec<&String> = part.specs.keys().collect();
        spec_keys.sort();
        let specs = spec_keys
            .into_iter()
            .map(|key| {
                let spec = &part.specs[key];
                json!({ "key": key, "value": spec.value, "unit": spec.unit })
            })
            .collect();

        self.insert_raw_part(product, props, specs, part.assemblies.clone());
    }

    /// Product names currently present, sorted.
    pub fn products(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().products.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of part records attached to a product.
    pub fn part_count(&self, product: &str) -> usize {
        self.inner
            .read()
            .products
            .get(product)
            .map_or(0, Vec::len)
    }

    /// The directed edge from one part to another, if computed.
    pub fn edge(&self, from: &str, to: &str) -> Option<CompatibilityEdge> {
        self.inner
            .read()
            .edges
            .get(&(from.to_string(), to.to_string()))
            .cloned()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }

    /// All directed edges, sorted by (from, to).
    pub fn edges(&self) -> Vec<(String, String, CompatibilityEdge)> {
        let data = self.inner.read();
        let mut all: Vec<(String, String, CompatibilityEdge)> = data
            .edges
            .iter()
            .map(|((from, to), edge)| (from.clone(), to.clone(), edge.clone()))
            .collect();
        all.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        all
    }
}

/// Write transaction that buffers statements and applies them on success.
#[derive(Default)]
struct MemoryTxn {
    upserts: Vec<(String, String, CompatibilityEdge)>,
}

impl GraphTxn for MemoryTxn {
    fn upsert_compatibility(
        &mut self,
        from: &str,
        to: &str,
        edge: &CompatibilityEdge,
    ) -> Result<()> {
        self.upserts
            .push((from.to_string(), to.to_string(), edge.clone()));
        Ok(())
    }
}

impl GraphStore for MemoryGraph {
    fn read(&self, query: ReadQuery<'_>) -> Result<Vec<Row>> {
        match query {
            ReadQuery::PartsForProduct { product } => {
                let data = self.inner.read();
                let Some(node_ids) = data.products.get(product) else {
                    return Ok(Vec::new());
                };

                let rows = node_ids
                    .iter()
                    .filter_map(|id| data.parts.get(id))
                    .map(|record| {
                        json!({
                            "part": record.props,
                            "specs": record.specs,
                            "assemblies": record.assemblies,
                        })
                    })
                    .collect();
                Ok(rows)
            }
        }
    }

    fn write(&self, work: &mut dyn FnMut(&mut dyn GraphTxn) -> Result<()>) -> Result<()> {
        let mut txn = MemoryTxn::default();
        work(&mut txn)?;

        let mut data = self.inner.write();
        for (from, to, edge) in txn.upserts {
            data.edges.insert((from, to), edge);
        }
        Ok(())
    }
}
