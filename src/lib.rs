//! # CompatX
//!
//! Explainable part-compatibility scoring over catalog graphs.
//!
//! CompatX estimates how interchangeable or mutually usable two mechanical
//! parts are, combining four similarity signals - mechanical spec closeness,
//! functional-role match, assembly co-membership, and semantic embedding
//! similarity - into one explainable score.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! compatx compute --catalog demos/lathe.json
//! compatx rank --catalog demos/lathe.json \
//!     --description "sealed ball bearing, 16mm bore" \
//!     --category Bearings --spec diameter=16:mm
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use std::sync::Arc;
//! use compatx::prelude::*;
//!
//! let store = Arc::new(MemoryGraph::new());
//! store.insert_part(
//!     "Lathe-X",
//!     &Part::new("P-001", "Spindle bearing", "Bearings")
//!         .with_assembly("Spindle Assembly")
//!         .with_spec("diameter", 16, "mm"),
//! );
//!
//! let engine = CompatibilityEngine::new(store, Arc::new(HashEmbedder::default()));
//!
//! // Batch mode: persist the symmetric relation for a product.
//! engine.compute_compatibility_for_product("Lathe-X").unwrap();
//!
//! // Virtual-part mode: rank a new part described in free text.
//! let query = NewPartQuery::new("sealed ball bearing, 16mm bore")
//!     .with_category("Bearings");
//! let ranked = engine
//!     .compute_compatibility_for_new_part("Lathe-X", &query, 10)
//!     .unwrap();
//! assert_eq!(ranked[0].part_id, "P-001");
//! ```
//!
//! ## Crate Structure
//!
//! CompatX is composed of several crates:
//!
//! - [`compatx-core`](https://docs.rs/compatx-core) - Data model, capability
//!   traits, scoring configuration
//! - [`compatx-store`](https://docs.rs/compatx-store) - Reference providers:
//!   in-memory graph, hash embedder, catalog ingestion
//! - [`compatx-scoring`](https://docs.rs/compatx-scoring) - The scoring
//!   engine: metrics, combiner, batch and virtual-part modes

// Re-export core types
pub use compatx_core::{
    AssemblyMap, CategoryPairings, CompatibilityEdge, Embedder, Embedding, Error, GraphStore,
    GraphTxn, Part, RankedMatch, ReadQuery, Result, Row, ScoringConfig, ScoringWeights, SpecValue,
    WeightsError, VIRTUAL_PART_ID,
};

// Re-export reference providers
pub use compatx_store::{
    ingest_catalog, ingest_file, parse_catalog, CatalogFile, HashEmbedder, IngestReport,
    MemoryGraph, DEFAULT_EMBED_DIM,
};

// Re-export the engine
pub use compatx_scoring::{
    fetch_parts_for_product, BatchReport, CompatibilityEngine, MetricScore, NewPartQuery,
    DEFAULT_TOP_K,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BatchReport, CompatibilityEdge, CompatibilityEngine, Embedder, Embedding, Error,
        GraphStore, HashEmbedder, MemoryGraph, NewPartQuery, Part, RankedMatch, Result,
        ScoringConfig, ScoringWeights, SpecValue,
    };
}
