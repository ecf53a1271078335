//! Edit distance with Real Penalty.

use tracing::{instrument, trace};

use crate::error::{DistanceError, require_finite, require_positive};
use crate::series::{TimeSeriesView, require_same_dims, shorter_first};

/// ERP configuration.
///
/// Gaps are charged against the reference value `g`. The band half-width is
/// `ceil(band_size * m)` with `m` the shorter length; `band_size` multiplies
/// the length directly and is not clamped to `[0, 1]`, so values above 1
/// leave the alignment unconstrained.
///
/// The grid is `m x m`: only the first `m` points of the longer series take
/// part, and its tail is ignored.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `band_size` | 5.0     |
/// | `g`         | 0.5     |
/// | `dim`       | 0       |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Erp {
    band_size: f64,
    g: f64,
    dim: usize,
}

impl Default for Erp {
    fn default() -> Self {
        Self {
            band_size: 5.0,
            g: 0.5,
            dim: 0,
        }
    }
}

impl Erp {
    /// Create an ERP calculator on dimension 0.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | `band_size` is not positive and finite |
    /// | [`DistanceError::InvalidParameter`] | `g` is NaN or infinite |
    pub fn new(band_size: f64, g: f64) -> Result<Self, DistanceError> {
        Ok(Self {
            band_size: require_positive("band_size", band_size)?,
            g: require_finite("g", g)?,
            dim: 0,
        })
    }

    /// Select the dimension to compare.
    #[must_use]
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    /// Return the band multiplier.
    #[must_use]
    pub fn band_size(&self) -> f64 {
        self.band_size
    }

    /// Return the gap reference value.
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Return the selected dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the band half-width for a shorter series of length `m`.
    #[must_use]
    pub fn half_width(&self, m: usize) -> usize {
        (self.band_size * m as f64).ceil() as usize
    }

    /// Compute the ERP distance between two series.
    ///
    /// Walks the grid with two owned row buffers. Each cell takes a delete
    /// (gap in `x`), insert (gap in `y`) or match step, resolved by a fixed
    /// cascade: delete when it is strictly cheaper than both others (or on
    /// the first row), else insert on the same terms (or on the first
    /// column), else match. The origin cell costs nothing. The result is the
    /// square root of cell `(m - 1, m - 1)`, which every band reaches, so it
    /// is always finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionMismatch`] | `x` and `y` differ in `dims` |
    /// | [`DistanceError::DimensionOutOfRange`] | `dim >= dims` |
    #[instrument(level = "debug", skip(x, y), fields(l1 = x.len(), l2 = y.len()))]
    pub fn distance(
        &self,
        x: TimeSeriesView<'_>,
        y: TimeSeriesView<'_>,
    ) -> Result<f64, DistanceError> {
        require_same_dims(x, y)?;
        let (x, y) = shorter_first(x, y);
        let xs = x.dimension(self.dim)?;
        let ys = y.dimension(self.dim)?;
        let m = xs.len();
        let g = self.g;
        let band = self.half_width(m);
        trace!(band, skipped = ys.len() - m, "erp band");

        let mut prev = vec![f64::INFINITY; m];
        let mut curr = vec![f64::INFINITY; m];

        for i in 0..m {
            std::mem::swap(&mut prev, &mut curr);

            // `curr` still holds row i - 2. Its cells beside this row's band
            // are read as predecessors and must be unreachable.
            let lo = i.saturating_sub(band);
            let hi = i.saturating_add(band).min(m - 1);
            if lo > 0 {
                curr[lo - 1] = f64::INFINITY;
            }
            if hi + 1 < m {
                curr[hi + 1] = f64::INFINITY;
            }

            let insert_cost = (xs[i] - g).powi(2);
            for j in lo..=hi {
                if i == 0 && j == 0 {
                    curr[0] = 0.0;
                    continue;
                }
                let (left, diag) = if j > 0 {
                    (curr[j - 1], prev[j - 1])
                } else {
                    (f64::INFINITY, f64::INFINITY)
                };
                let delete = left + (g - ys[j]).powi(2);
                let insert = prev[j] + insert_cost;
                let matched = diag + (xs[i] - ys[j]).powi(2);

                curr[j] = if i == 0 || (j != 0 && matched > delete && delete < insert) {
                    delete
                } else if j == 0 || (i != 0 && matched > insert && insert < delete) {
                    insert
                } else {
                    matched
                };
            }
        }

        Ok(curr[m - 1].sqrt())
    }
}

/// ERP distance with band multiplier `band_size` and gap value `g` on dimension `dim`.
///
/// # Errors
///
/// See [`Erp::new`] and [`Erp::distance`].
pub fn erp_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    band_size: f64,
    g: f64,
    dim: usize,
) -> Result<f64, DistanceError> {
    Erp::new(band_size, g)?.with_dim(dim).distance(x, y)
}
