//! Score combiner
//!
//! Folds the four metric outputs into one final score using the injected
//! weight table. Defaulted components are combined as genuine signal; the
//! sum is never renormalized around missing data.

use compatx_core::ScoringWeights;

use crate::metrics::MetricScore;

/// Weighted sum of the four sub-scores, with a one-line summary explanation.
pub fn combine_scores(
    weights: &ScoringWeights,
    mechanical: f32,
    functional: f32,
    semantic: f32,
    hierarchy: f32,
) -> MetricScore {
    let score = (weights.mechanical * mechanical
        + weights.functional * functional
        + weights.semantic * semantic
        + weights.hierarchy * hierarchy)
        .clamp(0.0, 1.0);

    MetricScore {
        score,
        explanations: vec![format!(
            "Final score = {:.2} (mechanical={:.2}, functional={:.2}, semantic={:.2}, hierarchy={:.2})",
            score, mechanical, functional, semantic, hierarchy
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_weighting() {
        let combined = combine_scores(&ScoringWeights::default(), 1.0, 0.8, 0.5, 1.0);
        assert!((combined.score - 0.825).abs() < 1e-6);
    }

    #[test]
    fn test_extremes() {
        let weights = ScoringWeights::default();
        assert_eq!(combine_scores(&weights, 0.0, 0.0, 0.0, 0.0).score, 0.0);
        assert!((combine_scores(&weights, 1.0, 1.0, 1.0, 1.0).score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary_explanation_format() {
        let combined = combine_scores(&ScoringWeights::default(), 1.0, 0.8, 0.5, 1.0);
        assert_eq!(combined.explanations.len(), 1);

        let line = &combined.explanations[0];
        assert!(line.starts_with("Final score = "));
        assert!(line.contains("mechanical=1.00"));
        assert!(line.contains("functional=0.80"));
        assert!(line.contains("semantic=0.50"));
        assert!(line.contains("hierarchy=1.00"));
    }

    #[test]
    fn test_alternate_weight_table() {
        let mut weights = ScoringWeights {
            mechanical: 1.0,
            functional: 0.0,
            semantic: 0.0,
            hierarchy: 0.0,
        };
        weights.validate_and_normalize().unwrap();

        let combined = combine_scores(&weights, 0.4, 1.0, 1.0, 1.0);
        assert!((combined.score - 0.4).abs() < 1e-6);
    }
}
