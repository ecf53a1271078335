//! Banded forward-fill dynamic programming shared by DTW and WDTW.

use tracing::trace;

use crate::cost::CostMatrix;
use crate::weights::WeightVector;

/// Smallest of three costs.
#[inline]
pub(crate) fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

/// Accumulates a [`CostMatrix`] in place inside a band of half-width `band`.
///
/// Row `i` (1-based, matrix coordinates) fills columns
/// `max(1, i - band) .. min(l2 + 1, i + band + 1)` with
///
/// ```text
/// D[i, j] = D[i, j] * w(|i - j|) + min(D[i-1, j], D[i, j-1], D[i-1, j-1])
/// ```
///
/// where `w` is 1 without weights. Before a row is filled, the cell just left
/// of its band and the cell just right of it are set to `+inf`: both are read
/// as predecessors by the next row and still hold raw point-wise costs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BandedSolver<'w> {
    band: usize,
    weights: Option<&'w WeightVector>,
}

impl<'w> BandedSolver<'w> {
    pub(crate) fn new(band: usize) -> Self {
        Self {
            band,
            weights: None,
        }
    }

    /// Multiply every cell's own cost by `weights[|i - j|]` before accumulating.
    ///
    /// `weights` must cover every offset the band admits.
    pub(crate) fn with_weights(mut self, weights: &'w WeightVector) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Fill `cost` in increasing row-major order.
    pub(crate) fn fill(&self, cost: &mut CostMatrix) {
        let (rows, cols) = cost.shape();
        let band = self.band;

        for i in 1..rows {
            let jstart = i.saturating_sub(band).max(1);
            let jstop = cols.min(i.saturating_add(band).saturating_add(1));

            if let Some(left) = i.checked_sub(band.saturating_add(1))
                && left < cols
            {
                cost[(i, left)] = f64::INFINITY;
            }
            if jstop < cols {
                cost[(i, jstop)] = f64::INFINITY;
            }

            for j in jstart..jstop {
                let own = match self.weights {
                    Some(w) => cost[(i, j)] * w[i.abs_diff(j)],
                    None => cost[(i, j)],
                };
                cost[(i, j)] = own + min3(cost[(i - 1, j)], cost[(i, j - 1)], cost[(i - 1, j - 1)]);
            }
        }
    }

    /// Fill `cost` and return its terminal cell.
    ///
    /// Returns `+inf` when the terminal cell lies outside the band, since it
    /// was never accumulated.
    pub(crate) fn solve(&self, mut cost: CostMatrix) -> f64 {
        let (rows, cols) = cost.shape();
        if (rows - 1).abs_diff(cols - 1) > self.band {
            trace!(band = self.band, rows, cols, "terminal cell outside band");
            return f64::INFINITY;
        }
        self.fill(&mut cost);
        cost.terminal()
    }
}
