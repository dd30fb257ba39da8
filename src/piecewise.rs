//! Two-regime returns curve: increasing returns up to a task threshold,
//! decreasing returns beyond it (coordination costs dominating further
//! division).

use crate::returns::DomainError;

/// A returns curve that switches exponent at a threshold task count.
///
/// Below or at `threshold_tasks` the curve is `scale * x^exponent_low`;
/// above it, `scale * x^exponent_high + offset`, where `offset` is fixed
/// at construction. The curve is defined at every integer task count but
/// NOT guaranteed continuous at the switch point; callers must not assume
/// continuity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiecewiseCurve {
    /// Output of a single undivided worker
    pub scale: f64,

    /// Last task count governed by the low-regime exponent
    pub threshold_tasks: u32,

    /// Exponent up to and including the threshold
    pub exponent_low: f64,

    /// Exponent beyond the threshold
    pub exponent_high: f64,

    /// Additive constant applied beyond the threshold, derived once from
    /// the other fields
    offset: f64,
}

impl PiecewiseCurve {
    /// Create a two-regime curve, precomputing the high-regime offset
    /// `scale * x_c^g_low - scale * (x_c + 1)^g_high + x_c`.
    pub fn new(scale: f64, threshold_tasks: u32, exponent_low: f64, exponent_high: f64) -> Self {
        let threshold = threshold_tasks as f64;
        let offset = scale * threshold.powf(exponent_low)
            - scale * (threshold + 1.0).powf(exponent_high)
            + threshold;
        Self {
            scale,
            threshold_tasks,
            exponent_low,
            exponent_high,
            offset,
        }
    }

    /// The cached high-regime offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Evaluate the curve at an integer task count.
    ///
    /// The curve is only defined from one task upward.
    pub fn output(&self, tasks: u32) -> Result<f64, DomainError> {
        if tasks < 1 {
            return Err(DomainError::TasksBelowOne);
        }
        let x = tasks as f64;
        if tasks <= self.threshold_tasks {
            Ok(self.scale * x.powf(self.exponent_low))
        } else {
            Ok(self.scale * x.powf(self.exponent_high) + self.offset)
        }
    }
}

impl Default for PiecewiseCurve {
    /// The classroom scenario: scale 10, regime switch after 8 tasks,
    /// exponents 1.2 then 0.8.
    fn default() -> Self {
        Self::new(10.0, 8, 1.2, 0.8)
    }
}
