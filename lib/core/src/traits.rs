//! Capability traits consumed by the engine
//!
//! The engine reaches its two external collaborators through these traits:
//! a graph store holding the product/part/spec/assembly catalog, and a text
//! embedding service. Neither is tied to a specific backend.

use serde_json::Value;

use crate::edge::CompatibilityEdge;
use crate::embedding::Embedding;
use crate::error::Result;

/// A raw result row from the catalog store.
///
/// For [`ReadQuery::PartsForProduct`], each row is an object of the form
/// `{"part": {..properties..}, "specs": [{..}, ..], "assemblies": [..]}`.
/// Rows are untyped on purpose: decoding (and skipping malformed records)
/// is the catalog accessor's job.
pub type Row = Value;

/// Read-side queries the engine issues against the catalog graph.
#[derive(Debug, Clone, Copy)]
pub enum ReadQuery<'a> {
    /// Every part reachable from the named product, with its specs and
    /// assembly memberships.
    PartsForProduct { product: &'a str },
}

/// A single write transaction against the catalog graph.
pub trait GraphTxn {
    /// Upsert one direction of a compatibility edge, replacing all of its
    /// fields. Pairs never computed have no edge at all.
    fn upsert_compatibility(
        &mut self,
        from: &str,
        to: &str,
        edge: &CompatibilityEdge,
    ) -> Result<()>;
}

/// The storage capability: reads return raw rows, writes run inside one
/// transaction per call.
pub trait GraphStore: Send + Sync {
    fn read(&self, query: ReadQuery<'_>) -> Result<Vec<Row>>;

    /// Run `work` inside a single transaction. If `work` returns an error,
    /// none of its statements are applied.
    fn write(&self, work: &mut dyn FnMut(&mut dyn GraphTxn) -> Result<()>) -> Result<()>;
}

/// The text embedding capability.
///
/// Repeated calls with the same text must stay comparable under cosine
/// similarity; exact determinism is not required.
pub trait Embedder: Send + Sync {
    /// Fixed output dimensionality.
    fn dim(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Embedding>;
}
