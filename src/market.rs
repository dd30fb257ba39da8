//! Market-clearing report: how far a market of a given demand lets the
//! division of labour go, and what surplus that division yields.

use crate::returns::{DomainError, ReturnCurve};

/// Summary of one demand level cleared against a returns curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketReport {
    /// Demand the market can absorb
    pub demand: f64,

    /// Largest task count that does not overproduce
    pub clearing_tasks: u32,

    /// Output with labour divided into that many tasks
    pub divided_output: f64,

    /// Output of the same workers each working alone
    pub undivided_output: f64,

    /// Divided output minus the undivided baseline
    pub surplus: f64,
}

impl MarketReport {
    /// Clear `demand` against `curve` and assemble the report.
    pub fn clear(curve: &ReturnCurve, demand: f64) -> Result<Self, DomainError> {
        let clearing_tasks = curve.clearing_tasks(demand)?;
        let divided_output = curve.output(clearing_tasks as f64)?;
        let undivided_output = curve.undivided_output(clearing_tasks);
        Ok(Self {
            demand,
            clearing_tasks,
            divided_output,
            undivided_output,
            surplus: divided_output - undivided_output,
        })
    }

    /// Surplus as the console collaborator displays it, floored to a
    /// whole number of units.
    pub fn surplus_floor(&self) -> i64 {
        self.surplus.floor() as i64
    }

    /// Console rendering of the report.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Market demand: {:.0}", self.demand),
            format!("Tasks supported by the market: {}", self.clearing_tasks),
            format!(
                "Output: {:.1} divided vs {:.1} undivided",
                self.divided_output, self.undivided_output
            ),
            format!(
                "Surplus production due to the division of labour: {}",
                self.surplus_floor()
            ),
        ]
    }

    pub fn print(&self) {
        for line in self.summary_lines() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_demand_100() {
        let curve = ReturnCurve::new(10.0, 1.59);
        let report = MarketReport::clear(&curve, 100.0).unwrap();
        assert_eq!(report.clearing_tasks, 4);
        assert!((report.undivided_output - 40.0).abs() < 1e-9);
        assert_eq!(report.surplus_floor(), 50);
    }

    #[test]
    fn test_surplus_grows_with_the_market() {
        let curve = ReturnCurve::new(10.0, 1.59);
        let small = MarketReport::clear(&curve, 100.0).unwrap();
        let large = MarketReport::clear(&curve, 200.0).unwrap();
        assert_eq!(large.clearing_tasks, 6);
        assert!(large.clearing_tasks > small.clearing_tasks);
        assert!(large.surplus > small.surplus);
    }

    #[test]
    fn test_report_propagates_domain_error() {
        let curve = ReturnCurve::new(10.0, 1.59);
        assert_eq!(
            MarketReport::clear(&curve, -5.0),
            Err(DomainError::NonPositiveDemand(-5.0))
        );
    }

    #[test]
    fn test_summary_mentions_surplus() {
        let curve = ReturnCurve::new(10.0, 1.59);
        let report = MarketReport::clear(&curve, 100.0).unwrap();
        let lines = report.summary_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("Surplus production"));
        assert!(lines[3].ends_with("50"));
    }
}
