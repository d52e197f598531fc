//! # CompatX Scoring
//!
//! The compatibility scoring engine: estimates how interchangeable or
//! mutually usable two catalog parts are by combining four independent
//! similarity signals into one explainable score.
//!
//! ## Signals
//!
//! - **Mechanical** - closeness of shared spec values (numeric and
//!   categorical), weight 0.35
//! - **Functional** - category match or known complementary pairing,
//!   weight 0.25
//! - **Semantic** - embedding cosine similarity, weight 0.25
//! - **Hierarchy** - shared assembly membership, weight 0.15
//!
//! Every signal tolerates missing data through a documented default instead
//! of an error path; failures are reserved for the storage and embedding
//! capabilities.
//!
//! ## Modes
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐
//! │   Catalog    │────>│   Metrics   │────>│   Combiner   │
//! │   Accessor   │     │ (4 signals) │     │ (weighted)   │
//! └──────────────┘     └─────────────┘     └──────────────┘
//!                                                 │
//!                         ┌───────────────────────┴─────────┐
//!                         │                                 │
//!                  ┌──────────────┐                ┌─────────────────┐
//!                  │ Batch: store │                │ Rank: virtual   │
//!                  │ symmetric    │                │ part vs product │
//!                  │ edges (n²)   │                │ (top-k, no I/O) │
//!                  └──────────────┘                └─────────────────┘
//! ```
//!
//! Both modes run the identical pipeline, so persisted pair scores and
//! virtual-part rankings are comparable.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use compatx_core::Part;
//! use compatx_store::{HashEmbedder, MemoryGraph};
//! use compatx_scoring::{CompatibilityEngine, NewPartQuery};
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
//! engine.compute_compatibility_for_product("Lathe-X").unwrap();
//!
//! let query = NewPartQuery::new("sealed ball bearing, 16mm bore")
//!     .with_category("Bearings")
//!     .with_spec("diameter", 16, "mm");
//! let ranked = engine
//!     .compute_compatibility_for_new_part("Lathe-X", &query, 10)
//!     .unwrap();
//! assert_eq!(ranked[0].part_id, "P-001");
//! ```

pub mod catalog;
pub mod combine;
pub mod engine;
pub mod metrics;

pub use catalog::fetch_parts_for_product;
pub use combine::combine_scores;
pub use engine::{BatchReport, CompatibilityEngine, NewPartQuery, DEFAULT_TOP_K};
pub use metrics::{
    functional_similarity, hierarchy_similarity, mechanical_similarity, semantic_similarity,
    MetricScore,
};
