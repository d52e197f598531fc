use serde::{Deserialize, Serialize};

/// A fixed-length embedding vector.
///
/// Serializes as a bare array of floats, matching how embeddings are stored
/// on part records in the catalog graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean norm of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Dot product with another vector.
    ///
    /// Vectors of unequal length are compared over their common prefix.
    #[inline]
    pub fn dot(&self, other: &Embedding) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Cosine similarity with another vector, in [-1, 1].
    ///
    /// Returns `None` when either vector has zero norm.
    pub fn cosine(&self, other: &Embedding) -> Option<f32> {
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }

        Some((self.dot(other) / (norm_a * norm_b)).clamp(-1.0, 1.0))
    }

    /// Normalize the vector to unit length in place.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(data: Vec<f32>) -> Self {
        Embedding::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![1.0, 2.0, 3.0]);

        let cos = a.cosine(&b).unwrap();
        assert!((cos - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![-1.0, 0.0]);

        let cos = a.cosine(&b).unwrap();
        assert!((cos + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_is_none() {
        let a = Embedding::new(vec![0.0, 0.0, 0.0]);
        let b = Embedding::new(vec![1.0, 2.0, 3.0]);

        assert!(a.cosine(&b).is_none());
        assert!(b.cosine(&a).is_none());
    }

    #[test]
    fn test_normalize() {
        let mut v = Embedding::new(vec![3.0, 4.0]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_serde_as_bare_array() {
        let v = Embedding::new(vec![0.5, 0.25]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[0.5,0.25]");

        let parsed: Embedding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }
}
