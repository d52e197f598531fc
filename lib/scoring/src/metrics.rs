//! Similarity metrics
//!
//! Four pure functions comparing two parts, each returning a score in
//! [0.0, 1.0] plus a human-readable explanation. Missing data never fails a
//! metric: each has a defined default, and only the mechanical default is
//! pessimistic - an unknown mechanical fit is not assumed safe, while an
//! unknown semantic relation is scored neutral.

use ahash::AHashSet;

use compatx_core::{CategoryPairings, Part};

/// One metric's output: a bounded score and its explanation trail.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricScore {
    pub score: f32,
    pub explanations: Vec<String>,
}

impl MetricScore {
    fn new(score: f32, explanation: impl Into<String>) -> Self {
        Self {
            score,
            explanations: vec![explanation.into()],
        }
    }
}

/// Closeness of two numeric spec values.
///
/// `1 - |a-b| / max(|a|,|b|)`, clamped to >= 0. Both zero is a perfect
/// match; exactly one zero scores 0.0 rather than dividing by zero.
fn numeric_closeness(a: f64, b: f64) -> f32 {
    if a == 0.0 && b == 0.0 {
        return 1.0;
    }
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let rel_diff = (a - b).abs() / a.abs().max(b.abs());
    (1.0 - rel_diff).max(0.0) as f32
}

/// Mechanical spec closeness over the parts' shared spec keys.
///
/// Numeric values are compared by relative closeness; categorical values
/// score 1.0 on exact match and are otherwise left out entirely (a
/// categorical mismatch contributes nothing rather than a penalty). No
/// comparable shared key defaults to 0.0.
pub fn mechanical_similarity(a: &Part, b: &Part) -> MetricScore {
    let mut scores: Vec<f32> = Vec::new();
    let mut explanations: Vec<String> = Vec::new();

    let mut shared_keys: Vec<&String> =
        a.specs.keys().filter(|key| b.specs.contains_key(*key)).collect();
    shared_keys.sort();

    for key in shared_keys {
        let spec_a = &a.specs[key];
        let spec_b = &b.specs[key];

        if let (Some(va), Some(vb)) = (spec_a.as_number(), spec_b.as_number()) {
            let score = numeric_closeness(va, vb);
            scores.push(score);
            explanations.push(format!(
                "Numeric spec '{}' close: {}{} vs {}{} (score={:.2})",
                key,
                spec_a.display_value(),
                spec_a.unit,
                spec_b.display_value(),
                spec_b.unit,
                score
            ));
        } else if !spec_a.value.is_null() && spec_a.value == spec_b.value {
            scores.push(1.0);
            explanations.push(format!(
                "Categorical spec '{}' matches: {} (score=1.00)",
                key,
                spec_a.display_value()
            ));
        }
    }

    if scores.is_empty() {
        return MetricScore::new(0.0, "No shared specs; mechanical similarity default 0.0");
    }

    MetricScore {
        score: scores.iter().sum::<f32>() / scores.len() as f32,
        explanations,
    }
}

/// Functional-role match on part categories.
///
/// Same category scores 1.0; a known complementary pairing earns partial
/// credit; unrelated categories score 0.0. Comparison is case-sensitive.
pub fn functional_similarity(a: &Part, b: &Part, pairings: &CategoryPairings) -> MetricScore {
    if a.category == b.category {
        return MetricScore::new(
            1.0,
            format!("Same category '{}' for both parts (score=1.0)", a.category),
        );
    }

    if pairings.contains(&a.category, &b.category) {
        let credit = pairings.partial_credit();
        return MetricScore::new(
            credit,
            format!(
                "Functional pairing between '{}' and '{}' (score={:.1})",
                a.category, b.category, credit
            ),
        );
    }

    MetricScore::new(
        0.0,
        format!(
            "Different categories '{}' vs '{}' (score=0.0)",
            a.category, b.category
        ),
    )
}

/// Assembly co-membership. Binary: 1.0 iff the parts share at least one
/// assembly, else 0.0.
pub fn hierarchy_similarity(a: &Part, b: &Part) -> MetricScore {
    let set_a: AHashSet<&str> = a.assemblies.iter().map(String::as_str).collect();
    let set_b: AHashSet<&str> = b.assemblies.iter().map(String::as_str).collect();

    let mut shared: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    shared.sort_unstable();

    if shared.is_empty() {
        return MetricScore::new(0.0, "No shared assemblies (score=0.0)");
    }

    MetricScore::new(
        1.0,
        format!("Parts share assemblies: {} (score=1.0)", shared.join(", ")),
    )
}

/// Embedding cosine similarity remapped from [-1, 1] to [0, 1].
///
/// A missing or zero-norm embedding on either side defaults to the neutral
/// 0.5 rather than a penalty.
pub fn semantic_similarity(a: &Part, b: &Part) -> MetricScore {
    let (Some(ea), Some(eb)) = (&a.embedding, &b.embedding) else {
        return MetricScore::new(0.5, "Missing embeddings; semantic similarity default 0.5");
    };

    let Some(cos) = ea.cosine(eb) else {
        return MetricScore::new(0.5, "Zero-length embeddings; semantic similarity default 0.5");
    };

    let score = ((cos + 1.0) / 2.0).clamp(0.0, 1.0);
    MetricScore::new(score, format!("Embedding cosine similarity ~ {:.2}", score))
}
