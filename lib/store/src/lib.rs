//! # CompatX Store
//!
//! Reference providers for the two capabilities the CompatX engine consumes:
//!
//! - [`MemoryGraph`] - An in-memory catalog graph implementing the storage
//!   capability, with transactional edge writes
//! - [`HashEmbedder`] - A deterministic hash-based text embedder
//! - [`ingest`] - JSON catalog file loading, computing part embeddings at
//!   ingest time
//!
//! These make the engine runnable and testable without an external graph
//! database or embedding service; production deployments substitute their
//! own [`GraphStore`](compatx_core::GraphStore) and
//! [`Embedder`](compatx_core::Embedder) implementations.

pub mod embed;
pub mod ingest;
pub mod memory;

pub use embed::{HashEmbedder, DEFAULT_EMBED_DIM};
pub use ingest::{ingest_catalog, ingest_file, parse_catalog, CatalogFile, IngestReport, PartEntry, ProductEntry, SpecEntry};
pub use memory::MemoryGraph;
