//! A common interface over every elastic distance, and by-name selection.

use std::fmt;
use std::str::FromStr;

use crate::dtw::{Ddtw, Dtw};
use crate::erp::Erp;
use crate::error::DistanceError;
use crate::lcss::Lcss;
use crate::msm::Msm;
use crate::series::TimeSeriesView;
use crate::wdtw::{Wddtw, Wdtw};

/// A configured elastic distance between two time series.
///
/// Implementors are immutable and `Sync`, so one instance can be shared by
/// any number of concurrent callers.
pub trait ElasticDistance: Send + Sync {
    /// Compute the distance between `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns a [`DistanceError`] when the inputs are incompatible with each
    /// other or with the measure's configuration.
    fn distance(&self, x: TimeSeriesView<'_>, y: TimeSeriesView<'_>) -> Result<f64, DistanceError>;

    /// Return the canonical lower-case name of the measure.
    fn name(&self) -> &'static str;
}

macro_rules! impl_elastic_distance {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl ElasticDistance for $ty {
                fn distance(
                    &self,
                    x: TimeSeriesView<'_>,
                    y: TimeSeriesView<'_>,
                ) -> Result<f64, DistanceError> {
                    <$ty>::distance(self, x, y)
                }

                fn name(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_elastic_distance! {
    Dtw => "dtw",
    Ddtw => "ddtw",
    Wdtw => "wdtw",
    Wddtw => "wddtw",
    Msm => "msm",
    Lcss => "lcss",
    Erp => "erp",
}

/// Any one of the supported measures with its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// Dynamic Time Warping.
    Dtw(Dtw),
    /// Derivative DTW.
    Ddtw(Ddtw),
    /// Weighted DTW.
    Wdtw(Wdtw),
    /// Weighted derivative DTW.
    Wddtw(Wddtw),
    /// Move-Split-Merge.
    Msm(Msm),
    /// Longest Common Subsequence.
    Lcss(Lcss),
    /// Edit distance with Real Penalty.
    Erp(Erp),
}

impl Measure {
    /// Names accepted by [`Measure::from_str`].
    pub const NAMES: [&'static str; 7] = ["dtw", "ddtw", "wdtw", "wddtw", "msm", "lcss", "erp"];

    fn inner(&self) -> &dyn ElasticDistance {
        match self {
            Self::Dtw(m) => m,
            Self::Ddtw(m) => m,
            Self::Wdtw(m) => m,
            Self::Wddtw(m) => m,
            Self::Msm(m) => m,
            Self::Lcss(m) => m,
            Self::Erp(m) => m,
        }
    }
}

impl ElasticDistance for Measure {
    fn distance(&self, x: TimeSeriesView<'_>, y: TimeSeriesView<'_>) -> Result<f64, DistanceError> {
        self.inner().distance(x, y)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

impl FromStr for Measure {
    type Err = DistanceError;

    /// Parse a measure name (case-insensitive) into its default configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dtw" => Ok(Self::Dtw(Dtw::default())),
            "ddtw" => Ok(Self::Ddtw(Ddtw::default())),
            "wdtw" => Ok(Self::Wdtw(Wdtw::default())),
            "wddtw" => Ok(Self::Wddtw(Wddtw::default())),
            "msm" => Ok(Self::Msm(Msm::default())),
            "lcss" => Ok(Self::Lcss(Lcss::default())),
            "erp" => Ok(Self::Erp(Erp::default())),
            _ => Err(DistanceError::UnknownMeasure { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! impl_from_config {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Measure {
                fn from(config: $ty) -> Self {
                    Self::$ty(config)
                }
            }
        )*
    };
}

impl_from_config!(Dtw, Ddtw, Wdtw, Wddtw, Msm, Lcss, Erp);
