//! Warping window constraints for banded dynamic programming.

use crate::error::{DistanceError, require_finite};

/// Constraint on the warping window.
///
/// Every variant resolves to a half-width `band` via
/// [`half_width`](Self::half_width); cell `(i, j)` is inside the band when
/// `|i - j| <= band`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BandConstraint {
    /// No constraint, the band spans the longer series.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band with an absolute half-width.
    SakoeChibaRadius(usize),

    /// Sakoe-Chiba band with half-width `round(w * max(l1, l2))`.
    ///
    /// A negative fraction behaves like [`BandConstraint::Unconstrained`].
    SakoeChibaFraction(f64),
}

impl BandConstraint {
    /// Build a constraint from a window fraction, where any negative `w`
    /// selects the unconstrained band.
    #[must_use]
    pub fn from_window(w: f64) -> Self {
        if w < 0.0 {
            Self::Unconstrained
        } else {
            Self::SakoeChibaFraction(w)
        }
    }

    /// Check that a fractional window is a finite number.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | Fraction is NaN or infinite |
    pub fn validate(self) -> Result<Self, DistanceError> {
        if let Self::SakoeChibaFraction(w) = self {
            require_finite("w", w)?;
        }
        Ok(self)
    }

    /// Return the band half-width for series of lengths `l1` and `l2`.
    ///
    /// Fractions round half to even, so `0.25 * 10` gives a half-width of 2.
    #[must_use]
    pub fn half_width(&self, l1: usize, l2: usize) -> usize {
        let longest = l1.max(l2);
        match *self {
            Self::Unconstrained => longest,
            Self::SakoeChibaRadius(r) => r,
            Self::SakoeChibaFraction(w) if w < 0.0 => longest,
            Self::SakoeChibaFraction(w) => (w * longest as f64).round_ties_even() as usize,
        }
    }
}
