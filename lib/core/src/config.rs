//! Static scoring configuration
//!
//! The weight table, category pairing table, and category-to-assembly map are
//! immutable configuration injected into the engine, so tests can substitute
//! alternate tables without touching global state.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Per-signal weights for the combined compatibility score.
///
/// Weights are applied as-is to every pair, including pairs where a signal
/// fell back to its missing-data default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub mechanical: f32,
    pub functional: f32,
    pub semantic: f32,
    pub hierarchy: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            mechanical: 0.35,
            functional: 0.25,
            semantic: 0.25,
            hierarchy: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Validate the weight table
    /// - Checks that weights are non-negative
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), WeightsError> {
        for (name, weight) in [
            ("mechanical", self.mechanical),
            ("functional", self.functional),
            ("semantic", self.semantic),
            ("hierarchy", self.hierarchy),
        ] {
            if weight < 0.0 {
                return Err(WeightsError::NegativeWeight(name));
            }
        }

        let sum = self.mechanical + self.functional + self.semantic + self.hierarchy;
        if sum <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }

        if (sum - 1.0).abs() > 0.001 {
            self.mechanical /= sum;
            self.functional /= sum;
            self.semantic /= sum;
            self.hierarchy /= sum;
        }

        Ok(())
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum WeightsError {
    #[error("Signal '{0}' has negative weight")]
    NegativeWeight(&'static str),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}

/// Known complementary category pairs, looked up unordered.
///
/// Same-role parts score 1.0 before the table is consulted; a pair listed
/// here earns partial credit instead of 0.0.
#[derive(Debug, Clone)]
pub struct CategoryPairings {
    pairs: AHashSet<(String, String)>,
    partial_credit: f32,
}

impl Default for CategoryPairings {
    fn default() -> Self {
        let mut pairings = Self::empty(0.8);
        for (a, b) in [
            ("Bearings", "Spindle"),
            ("Z Axis", "Z Axis"),
            ("X Axis", "X Axis"),
            ("Tailstock", "Tailstock"),
            ("Mold", "Mold"),
            ("Materials", "Mold"),
            ("Tools", "Mold"),
        ] {
            pairings.insert(a, b);
        }
        pairings
    }
}

impl CategoryPairings {
    #[must_use]
    pub fn empty(partial_credit: f32) -> Self {
        Self {
            pairs: AHashSet::new(),
            partial_credit,
        }
    }

    pub fn insert(&mut self, a: &str, b: &str) {
        self.pairs.insert(Self::key(a, b));
    }

    /// Whether the unordered pair (a, b) is a known pairing.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Score granted to a known pairing.
    #[inline]
    pub fn partial_credit(&self) -> f32 {
        self.partial_credit
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

/// Static category-to-assembly lookup, used to seed a virtual part's assembly
/// membership when no explicit hint is supplied, and by ingestion when a
/// catalog entry names no assembly.
#[derive(Debug, Clone)]
pub struct AssemblyMap {
    map: AHashMap<String, String>,
}

impl Default for AssemblyMap {
    fn default() -> Self {
        let mut assemblies = Self::empty();
        for (category, assembly) in [
            ("Bearings", "Spindle Assembly"),
            ("Spindle", "Spindle Assembly"),
            ("Z Axis", "Z Axis Assembly"),
            ("X Axis", "X Axis Assembly"),
            ("Tailstock", "Tailstock Assembly"),
            ("Mold", "Mold Assembly"),
            ("Materials", "Mold Assembly"),
            ("Tools", "Mold Assembly"),
        ] {
            assemblies.insert(category, assembly);
        }
        assemblies
    }
}

impl AssemblyMap {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    pub fn insert(&mut self, category: &str, assembly: &str) {
        self.map.insert(category.to_string(), assembly.to_string());
    }

    pub fn assembly_for(&self, category: &str) -> Option<&str> {
        self.map.get(category).map(String::as_str)
    }
}

/// Bundled configuration for the compatibility engine.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub pairings: CategoryPairings,
    pub assembly_map: AssemblyMap,
}
