use serde::{Deserialize, Serialize};

use crate::part::Part;

/// A scored, explained compatibility relationship between two parts.
///
/// Edges are symmetric by construction: both directions of a computed pair
/// carry identical fields. A fresh batch run fully replaces prior fields for
/// every pair it touches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityEdge {
    /// Final combined score in [0, 1].
    pub score: f32,
    pub mechanical: f32,
    pub functional: f32,
    pub semantic: f32,
    pub hierarchy: f32,
    /// Ordered explanation trail: per-signal explanations, then the summary.
    pub explanations: Vec<String>,
}

/// One entry of a virtual-part ranking: an existing part with its score
/// breakdown against the virtual part. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub part_id: String,
    pub name: String,
    pub category: String,
    pub assemblies: Vec<String>,
    pub score: f32,
    pub mechanical: f32,
    pub functional: f32,
    pub semantic: f32,
    pub hierarchy: f32,
    pub explanations: Vec<String>,
}

impl RankedMatch {
    /// Build a ranking entry for an existing part from its computed edge.
    #[must_use]
    pub fn from_edge(part: &Part, edge: CompatibilityEdge) -> Self {
        Self {
            part_id: part.part_id.clone(),
            name: part.name.clone(),
            category: part.category.clone(),
            assemblies: part.assemblies.clone(),
            score: edge.score,
            mechanical: edge.mechanical,
            functional: edge.functional,
            semantic: edge.semantic,
            hierarchy: edge.hierarchy,
            explanations: edge.explanations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_edge() -> CompatibilityEdge {
        CompatibilityEdge {
            score: 0.825,
            mechanical: 1.0,
            functional: 0.8,
            semantic: 0.5,
            hierarchy: 1.0,
            explanations: vec!["Numeric spec 'diameter' close: 16mm vs 16mm (score=1.00)".into()],
        }
    }

    #[test]
    fn test_edge_serde_roundtrip() {
        let edge = sample_edge();
        let json = serde_json::to_string(&edge).unwrap();
        let parsed: CompatibilityEdge = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, edge);
    }

    #[test]
    fn test_ranked_match_from_edge() {
        let part = Part::new("P-002", "Spindle", "Spindle").with_assembly("Spindle Assembly");
        let ranked = RankedMatch::from_edge(&part, sample_edge());

        assert_eq!(ranked.part_id, "P-002");
        assert_eq!(ranked.category, "Spindle");
        assert_eq!(ranked.assemblies, vec!["Spindle Assembly"]);
        assert_eq!(ranked.score, 0.825);
        assert_eq!(ranked.explanations.len(), 1);
    }
}
