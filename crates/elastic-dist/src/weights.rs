//! Logistic weights for weighted DTW.

use std::ops::Index;

/// Per-offset multipliers, indexed by `|i - j|`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Logistic weights `1 / (1 + exp(-g * (k - n/2)))` for `k` in `0..n`.
    ///
    /// `g` controls how steeply offsets away from the diagonal are penalized;
    /// `g = 0` weights every offset by 0.5.
    #[must_use]
    pub fn logistic(g: f64, n: usize) -> Self {
        Self::logistic_extended(g, n, n)
    }

    /// The same logistic curve centred on `n/2`, evaluated for `k` in `0..len`.
    ///
    /// Used when the two series differ in length and offsets reach past `n`.
    #[must_use]
    pub fn logistic_extended(g: f64, n: usize, len: usize) -> Self {
        let half = n as f64 / 2.0;
        Self(
            (0..len)
                .map(|k| 1.0 / (1.0 + (-g * (k as f64 - half)).exp()))
                .collect(),
        )
    }

    /// Return the number of offsets covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if no offsets are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the weights as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, offset: usize) -> &Self::Output {
        &self.0[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_matches_n() {
        assert_eq!(WeightVector::logistic(0.5, 7).len(), 7);
        assert!(WeightVector::logistic(0.5, 0).is_empty());
    }

    #[test]
    fn zero_steepness_is_flat_half() {
        let w = WeightVector::logistic(0.0, 5);
        for &v in w.as_slice() {
            assert!((v - 0.5).abs() < 1e-12, "expected 0.5, got {v}");
        }
    }

    #[test]
    fn midpoint_is_half() {
        let w = WeightVector::logistic(3.0, 4);
        assert!((w[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn increasing_for_positive_g() {
        let w = WeightVector::logistic(0.25, 10);
        for pair in w.as_slice().windows(2) {
            assert!(pair[1] > pair[0], "weights not increasing: {pair:?}");
        }
    }

    #[test]
    fn hand_computed_value() {
        // k = 0, n = 2, g = 1: 1 / (1 + e^1)
        let w = WeightVector::logistic(1.0, 2);
        let expected = 1.0 / (1.0 + 1.0_f64.exp());
        assert!((w[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn extended_agrees_on_shared_prefix() {
        let short = WeightVector::logistic(0.7, 4);
        let long = WeightVector::logistic_extended(0.7, 4, 9);
        assert_eq!(long.len(), 9);
        assert_eq!(&long.as_slice()[..4], short.as_slice());
    }
}
