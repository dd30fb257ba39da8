//! Single-regime returns to the division of labour.
//!
//! Models output as `r = a * x^gamma` where `x` is the number of divided
//! tasks, `a` the output of one worker working alone and `gamma` the
//! returns-to-specialization exponent.

use thiserror::Error;

/// Errors raised when an input falls outside the mathematical domain of
/// the function being evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Market demand must be positive for the clearing solver
    #[error("demand must be positive, got {0}")]
    NonPositiveDemand(f64),

    /// Curve scale must be positive (logarithm undefined otherwise)
    #[error("curve scale must be positive, got {0}")]
    NonPositiveScale(f64),

    /// Exponent must be positive for the clearing solver
    #[error("returns exponent must be positive, got {0}")]
    NonPositiveExponent(f64),

    /// Real exponentiation of a negative base with a fractional exponent
    #[error("output undefined for negative task quantity {0} with fractional exponent")]
    NegativeBase(f64),

    /// Piecewise curve is only defined from one task upward
    #[error("task count must be at least 1")]
    TasksBelowOne,
}

/// Broad regime of returns to specialization, by exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReturnsRegime {
    /// gamma < 1: each further division adds less than the last
    Decreasing,
    /// gamma = 1: output scales linearly with tasks, no surplus
    Constant,
    /// gamma > 1: specialization compounds, surplus grows with the market
    #[default]
    Increasing,
}

impl ReturnsRegime {
    pub fn all() -> &'static [Self] {
        &[Self::Decreasing, Self::Constant, Self::Increasing]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Decreasing => "Decreasing returns (sub-linear output)",
            Self::Constant => "Constant returns (linear output)",
            Self::Increasing => "Increasing returns (surplus from specialization)",
        }
    }

    /// Representative exponent used by the regime-comparison figure.
    pub fn sample_exponent(&self) -> f64 {
        match self {
            Self::Decreasing => 0.5,
            Self::Constant => 1.0,
            Self::Increasing => 1.5,
        }
    }
}

impl std::fmt::Display for ReturnsRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decreasing => write!(f, "decreasing"),
            Self::Constant => write!(f, "constant"),
            Self::Increasing => write!(f, "increasing"),
        }
    }
}

/// A single-regime returns curve `output(x) = scale * x^exponent`.
///
/// Immutable after construction; every operation is a pure function of
/// the curve and its arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnCurve {
    /// Output of a single undivided worker (a)
    pub scale: f64,

    /// Returns-to-specialization exponent (gamma)
    pub exponent: f64,
}

impl ReturnCurve {
    /// Create a curve from its scale and exponent.
    pub fn new(scale: f64, exponent: f64) -> Self {
        Self { scale, exponent }
    }

    /// Calibrate a curve through two observations: output with one task
    /// and output with two tasks.
    ///
    /// Solving `a * 1^gamma = output_one` and `a * 2^gamma = output_two`
    /// gives `a = output_one` and `gamma = ln(output_two / output_one) / ln 2`.
    pub fn from_points(output_one: f64, output_two: f64) -> Self {
        Self {
            scale: output_one,
            exponent: (output_two / output_one).ln() / 2.0_f64.ln(),
        }
    }

    /// The seamstress calibration: one worker makes 10 dresses in a unit
    /// of time, two workers splitting the tasks make 30.
    ///
    /// Yields `scale = 10`, `exponent = ln 3 / ln 2 (~1.585)`.
    pub fn seamstress() -> Self {
        Self::from_points(10.0, 30.0)
    }

    /// Which returns regime this curve's exponent falls in.
    pub fn regime(&self) -> ReturnsRegime {
        if self.exponent < 1.0 {
            ReturnsRegime::Decreasing
        } else if self.exponent > 1.0 {
            ReturnsRegime::Increasing
        } else {
            ReturnsRegime::Constant
        }
    }

    /// Evaluate `scale * x^exponent` at a real-valued task quantity.
    ///
    /// Fails for negative `x` when the exponent is fractional, where real
    /// exponentiation is undefined.
    pub fn output(&self, x: f64) -> Result<f64, DomainError> {
        if x < 0.0 && self.exponent.fract() != 0.0 {
            return Err(DomainError::NegativeBase(x));
        }
        Ok(self.scale * x.powf(self.exponent))
    }

    /// Output of `tasks` workers each working alone, without any division
    /// of labour: `scale` units per worker, additively.
    pub fn undivided_output(&self, tasks: u32) -> f64 {
        self.scale * tasks as f64
    }

    /// Largest task count whose output does not exceed `demand`.
    ///
    /// Inverts the curve in closed form, `floor(exp(ln(demand / scale) / exponent))`,
    /// so the returned count never implies overproduction at the exact
    /// real-valued solution.
    pub fn clearing_tasks(&self, demand: f64) -> Result<u32, DomainError> {
        if demand <= 0.0 {
            return Err(DomainError::NonPositiveDemand(demand));
        }
        if self.scale <= 0.0 {
            return Err(DomainError::NonPositiveScale(self.scale));
        }
        if self.exponent <= 0.0 {
            return Err(DomainError::NonPositiveExponent(self.exponent));
        }
        let tasks = ((demand / self.scale).ln() / self.exponent).exp().floor();
        Ok(tasks as u32)
    }

    /// Excess of divided-labour output over the undivided baseline at a
    /// given task count.
    ///
    /// Non-negative whenever `exponent >= 1` and `tasks >= 1`; may be
    /// negative under decreasing returns, which is a valid result.
    pub fn surplus(&self, tasks: u32) -> Result<f64, DomainError> {
        Ok(self.output(tasks as f64)? - self.undivided_output(tasks))
    }
}
