//! # CompatX Core
//!
//! Core library for the CompatX part-compatibility engine.
//!
//! This crate provides the shared data model and the seams the engine is
//! built around:
//!
//! - [`Part`] - A catalog part with specs, assembly memberships, and an
//!   optional embedding
//! - [`CompatibilityEdge`] - A scored, explained, symmetric relationship
//!   between two parts
//! - [`GraphStore`] / [`Embedder`] - Capability traits for the catalog
//!   store and the text embedding service
//! - [`ScoringWeights`], [`CategoryPairings`], [`AssemblyMap`] - Injected
//!   static configuration
//!
//! ## Example
//!
//! ```rust
//! use compatx_core::{Part, ScoringWeights};
//!
//! let part = Part::new("P-001", "Spindle bearing", "Bearings")
//!     .with_assembly("Spindle Assembly")
//!     .with_spec("diameter", 16, "mm");
//!
//! assert_eq!(part.specs.get("diameter").unwrap().as_number(), Some(16.0));
//!
//! let mut weights = ScoringWeights::default();
//! weights.validate_and_normalize().unwrap();
//! ```

pub mod config;
pub mod edge;
pub mod embedding;
pub mod error;
pub mod part;
pub mod traits;

pub use config::{AssemblyMap, CategoryPairings, ScoringConfig, ScoringWeights, WeightsError};
pub use edge::{CompatibilityEdge, RankedMatch};
pub use embedding::Embedding;
pub use error::{Error, Result};
pub use part::{Part, SpecValue, VIRTUAL_PART_ID};
pub use traits::{Embedder, GraphStore, GraphTxn, ReadQuery, Row};
