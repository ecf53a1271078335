//! Elastic distance measures for multivariate time series.
//!
//! Pure math library, zero I/O. Provides banded dynamic-programming
//! distances between two series of possibly different lengths: Dynamic Time
//! Warping with its windowed, weighted and derivative variants (DTW, WDTW,
//! DDTW, WDDTW), Move-Split-Merge (MSM), tolerance-based Longest Common
//! Subsequence (LCSS) and Edit distance with Real Penalty (ERP).
//!
//! Series are `(length, dims)` arrays wrapped in [`TimeSeries`]; every
//! measure takes [`TimeSeriesView`]s. MSM, LCSS and ERP compare one selected
//! dimension. Each call owns its scratch buffers, so calls are reentrant and
//! may run concurrently.
//!
//! ```
//! use elastic_dist::{TimeSeries, dtw_distance, lcss_distance};
//!
//! let x = TimeSeries::univariate(vec![0.0, 1.0, 2.0]).unwrap();
//! let y = TimeSeries::univariate(vec![0.0, 1.0, 1.0, 2.0]).unwrap();
//!
//! assert_eq!(dtw_distance(x.as_view(), y.as_view(), -1.0).unwrap(), 0.0);
//! assert_eq!(lcss_distance(x.as_view(), y.as_view(), 1, 0.0, 0).unwrap(), 0.0);
//! ```

mod constraint;
mod cost;
mod dtw;
mod erp;
mod error;
mod lcss;
mod measure;
mod msm;
pub mod preprocess;
mod series;
mod solver;
mod wdtw;
mod weights;

pub use constraint::BandConstraint;
pub use cost::CostMatrix;
pub use dtw::{Ddtw, Dtw, ddtw_distance, dtw_distance};
pub use erp::{Erp, erp_distance};
pub use error::{DistanceError, ShapeError};
pub use lcss::{Lcss, lcss_distance};
pub use measure::{ElasticDistance, Measure};
pub use msm::{Msm, msm_distance};
pub use series::{TimeSeries, TimeSeriesView};
pub use wdtw::{Wddtw, Wdtw, wddtw_distance, wdtw_distance};
pub use weights::WeightVector;
