//! Distances computed from rayon workers must equal sequential results.

use elastic_dist::{ElasticDistance, Measure, TimeSeries};
use rayon::prelude::*;

fn make_series(count: usize, len: usize) -> Vec<TimeSeries> {
    (0..count)
        .map(|k| {
            let values = (0..len + k % 3)
                .map(|i| (i as f64 * 0.3 + k as f64).sin() * (1.0 + k as f64 * 0.1))
                .collect();
            TimeSeries::univariate(values).expect("valid test series")
        })
        .collect()
}

#[test]
fn parallel_matches_sequential() {
    let series = make_series(12, 24);
    let pairs: Vec<(usize, usize)> = (0..series.len())
        .flat_map(|i| (0..series.len()).map(move |j| (i, j)))
        .collect();

    for name in Measure::NAMES {
        let measure: Measure = name.parse().unwrap();
        let compute = |&(i, j): &(usize, usize)| {
            measure
                .distance(series[i].as_view(), series[j].as_view())
                .unwrap()
        };

        let sequential: Vec<f64> = pairs.iter().map(compute).collect();
        let parallel: Vec<f64> = pairs.par_iter().map(compute).collect();

        for (k, (s, p)) in sequential.iter().zip(&parallel).enumerate() {
            assert!(
                s.to_bits() == p.to_bits(),
                "{name} pair {k}: sequential {s} vs parallel {p}"
            );
        }
    }
}

#[test]
fn shared_trait_object_across_threads() {
    let series = make_series(8, 16);
    let measure: Box<dyn ElasticDistance> = Box::new("msm".parse::<Measure>().unwrap());

    let row_sums: Vec<f64> = series
        .par_iter()
        .map(|a| {
            series
                .iter()
                .map(|b| measure.distance(a.as_view(), b.as_view()).unwrap())
                .sum()
        })
        .collect();

    assert_eq!(row_sums.len(), series.len());
    assert!(row_sums.iter().all(|s| s.is_finite() && *s >= 0.0));
}
