//! Compatibility engine
//!
//! The two operating modes over the shared metrics + combiner pipeline:
//! batch computation of the persisted symmetric relation for a product, and
//! on-demand ranking of a virtual part built from free text. Both modes
//! score pairs by the same rules, so persisted pair scores and virtual-part
//! rankings are directly comparable.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use compatx_core::{
    CompatibilityEdge, Embedder, Error, GraphStore, Part, RankedMatch, Result, ScoringConfig,
    SpecValue, VIRTUAL_PART_ID,
};

use crate::catalog::fetch_parts_for_product;
use crate::combine::combine_scores;
use crate::metrics::{
    functional_similarity, hierarchy_similarity, mechanical_similarity, semantic_similarity,
};

/// Default number of results a virtual-part ranking returns.
pub const DEFAULT_TOP_K: usize = 10;

/// Inputs describing a part that does not exist in the catalog yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPartQuery {
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub specs: AHashMap<String, SpecValue>,
    #[serde(default)]
    pub assembly_hint: Option<String>,
}

impl NewPartQuery {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_spec(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
        unit: impl Into<String>,
    ) -> Self {
        self.specs.insert(key.into(), SpecValue::new(value, unit));
        self
    }

    #[must_use]
    pub fn with_assembly_hint(mut self, assembly: impl Into<String>) -> Self {
        self.assembly_hint = Some(assembly.into());
        self
    }
}

/// Counts from a batch compatibility run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub parts: usize,
    pub pairs: usize,
}

/// The compatibility scoring engine.
///
/// Holds the two capability handles and the injected scoring configuration.
/// No state is carried across calls; every invocation re-fetches its parts.
pub struct CompatibilityEngine {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
    config: ScoringConfig,
}

impl CompatibilityEngine {
    /// Create an engine with the default weight and pairing tables.
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            store,
            embedder,
            config: ScoringConfig::default(),
        }
    }

    /// Create an engine with a custom configuration. Weights are validated
    /// and normalized up front.
    pub fn with_config(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn Embedder>,
        mut config: ScoringConfig,
    ) -> Result<Self> {
        config
            .weights
            .validate_and_normalize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        Ok(Self {
            store,
            embedder,
            config,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one pair of parts through the four metrics and the combiner.
    pub fn score_pair(&self, a: &Part, b: &Part) -> CompatibilityEdge {
        let mechanical = mechanical_similarity(a, b);
        let functional = functional_similarity(a, b, &self.config.pairings);
        let semantic = semantic_similarity(a, b);
        let hierarchy = hierarchy_similarity(a, b);
        let combined = combine_scores(
            &self.config.weights,
            mechanical.score,
            functional.score,
            semantic.score,
            hierarchy.score,
        );

        let mut explanations = mechanical.explanations;
        explanations.extend(functional.explanations);
        explanations.extend(semantic.explanations);
        explanations.extend(hierarchy.explanations);
        explanations.extend(combined.explanations);

        CompatibilityEdge {
            score: combined.score,
            mechanical: mechanical.score,
            functional: functional.score,
            semantic: semantic.score,
            hierarchy: hierarchy.score,
            explanations,
        }
    }

    /// Compute and persist the symmetric compatibility relation for every
    /// unordered pair of the product's parts.
    ///
    /// Each pair is written in its own transaction, both directions with
    /// identical fields. Re-running on unchanged data reproduces identical
    /// edge fields; an interrupted run leaves already-written pairs intact.
    pub fn compute_compatibility_for_product(&self, product: &str) -> Result<BatchReport> {
        let parts = fetch_parts_for_product(self.store.as_ref(), product)?;
        let mut report = BatchReport {
            parts: parts.len(),
            pairs: 0,
        };

        for i in 0..parts.len() {
            for j in (i + 1)..parts.len() {
                let (a, b) = (&parts[i], &parts[j]);
                let edge = self.score_pair(a, b);

                self.store.write(&mut |txn| {
                    txn.upsert_compatibility(&a.part_id, &b.part_id, &edge)?;
                    txn.upsert_compatibility(&b.part_id, &a.part_id, &edge)
                })?;

                debug!(
                    "{}: {} <-> {} score={:.2} (mech={:.2}, func={:.2}, sem={:.2}, hier={:.2})",
                    product,
                    a.part_id,
                    b.part_id,
                    edge.score,
                    edge.mechanical,
                    edge.functional,
                    edge.semantic,
                    edge.hierarchy
                );
                report.pairs += 1;
            }
        }

        info!(
            "Computed compatibility for product '{}': {} parts, {} pairs",
            product, report.parts, report.pairs
        );
        Ok(report)
    }

    /// Build the transient part a ranking request describes.
    ///
    /// The embedding is computed synchronously from the description. With no
    /// assembly hint, a recognized category seeds membership from the static
    /// category-to-assembly map.
    pub fn build_virtual_part(&self, query: &NewPartQuery) -> Result<Part> {
        let embedding = self.embedder.embed(&query.description)?;

        let mut assemblies = Vec::new();
        if let Some(hint) = &query.assembly_hint {
            assemblies.push(hint.clone());
        } else if let Some(category) = &query.category {
            if let Some(assembly) = self.config.assembly_map.assembly_for(category) {
                assemblies.push(assembly.to_string());
            }
        }

        Ok(Part {
            part_id: VIRTUAL_PART_ID.to_string(),
            name: "New Part".to_string(),
            category: query
                .category
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            description: Some(query.description.clone()),
            assemblies,
            specs: query.specs.clone(),
            embedding: Some(embedding),
        })
    }

    /// Rank a virtual part against all of a product's real parts.
    ///
    /// Scores with the same pipeline as batch mode, sorts descending, and
    /// truncates to `top_k`. Performs no writes; a product with zero parts
    /// yields an empty list.
    pub fn compute_compatibility_for_new_part(
        &self,
        product: &str,
        query: &NewPartQuery,
        top_k: usize,
    ) -> Result<Vec<RankedMatch>> {
        let existing = fetch_parts_for_product(self.store.as_ref(), product)?;
        let virtual_part = self.build_virtual_part(query)?;

        let mut results: Vec<RankedMatch> = existing
            .iter()
            .map(|part| RankedMatch::from_edge(part, self.score_pair(&virtual_part, part)))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        debug!(
            "Ranked virtual part against product '{}': {} candidates, top_k={}",
            product,
            existing.len(),
            top_k
        );
        Ok(results)
    }
}
