//! Sampling curves into ordered data series for charting and export.

use std::ops::RangeInclusive;

use crate::piecewise::PiecewiseCurve;
use crate::returns::{DomainError, ReturnCurve};

/// Anything evaluable at an integer task count.
pub trait TaskCurve {
    fn output_at(&self, tasks: u32) -> Result<f64, DomainError>;
}

impl TaskCurve for ReturnCurve {
    fn output_at(&self, tasks: u32) -> Result<f64, DomainError> {
        self.output(tasks as f64)
    }
}

impl TaskCurve for PiecewiseCurve {
    fn output_at(&self, tasks: u32) -> Result<f64, DomainError> {
        self.output(tasks)
    }
}

/// An ordered `(task count, output)` series, the shape handed to the
/// chart renderer and the JSON exporter.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub xs: Vec<u32>,
    pub ys: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterate points in sampling order.
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Largest sampled output, for sizing chart bounds.
    pub fn y_max(&self) -> f64 {
        self.ys.iter().copied().fold(f64::MIN, f64::max)
    }

    /// Smallest sampled output.
    pub fn y_min(&self) -> f64 {
        self.ys.iter().copied().fold(f64::MAX, f64::min)
    }
}

/// Sample a curve at each listed task count, preserving list order.
///
/// Recomputed fresh on every call; nothing is cached across calls.
pub fn sample_at(curve: &impl TaskCurve, tasks: &[u32]) -> Result<Series, DomainError> {
    let mut ys = Vec::with_capacity(tasks.len());
    for &x in tasks {
        ys.push(curve.output_at(x)?);
    }
    Ok(Series {
        xs: tasks.to_vec(),
        ys,
    })
}

/// Sample a curve over an inclusive range of task counts.
pub fn sample(curve: &impl TaskCurve, tasks: RangeInclusive<u32>) -> Result<Series, DomainError> {
    let xs: Vec<u32> = tasks.collect();
    sample_at(curve, &xs)
}

/// The undivided baseline `scale * x`: each task performed by a lone
/// worker, additively.
pub fn linear_baseline(scale: f64, tasks: RangeInclusive<u32>) -> Series {
    let xs: Vec<u32> = tasks.collect();
    let ys = xs.iter().map(|&x| scale * x as f64).collect();
    Series { xs, ys }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_preserves_order() {
        let curve = ReturnCurve::new(10.0, 1.5);
        let series = sample(&curve, 1..=10).unwrap();
        assert_eq!(series.xs, (1..=10).collect::<Vec<u32>>());
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn test_sample_matches_pointwise_evaluation() {
        let curve = PiecewiseCurve::new(10.0, 8, 1.2, 0.8);
        let series = sample(&curve, 1..=20).unwrap();
        for (x, y) in series.points() {
            assert!((y - curve.output(x).unwrap()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sample_propagates_domain_error() {
        let curve = PiecewiseCurve::default();
        assert_eq!(sample(&curve, 0..=5), Err(DomainError::TasksBelowOne));
    }

    #[test]
    fn test_sample_at_arbitrary_ordered_counts() {
        let curve = ReturnCurve::new(10.0, 1.59);
        let series = sample_at(&curve, &[2, 5, 9]).unwrap();
        assert_eq!(series.xs, vec![2, 5, 9]);
        assert!((series.ys[1] - curve.output(5.0).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_linear_baseline() {
        let series = linear_baseline(10.0, 1..=4);
        assert_eq!(series.ys, vec![10.0, 20.0, 30.0, 40.0]);
        assert!((series.y_max() - 40.0).abs() < 1e-12);
        assert!((series.y_min() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_resampling_is_fresh_and_identical() {
        let curve = ReturnCurve::seamstress();
        let first = sample(&curve, 1..=10).unwrap();
        let second = sample(&curve, 1..=10).unwrap();
        assert_eq!(first, second);
    }
}
