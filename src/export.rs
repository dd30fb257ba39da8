//! Export computed series and market reports to JSON

use std::fs::File;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::market::MarketReport;
use crate::returns::ReturnCurve;
use crate::series::Series;

/// Exported scenario data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioExport {
    pub curve: CurveExport,
    pub reports: Vec<MarketReportExport>,
    pub series: Vec<SeriesExport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurveExport {
    pub scale: f64,
    pub exponent: f64,
    pub regime: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketReportExport {
    pub demand: f64,
    pub clearing_tasks: u32,
    pub divided_output: f64,
    pub undivided_output: f64,
    pub surplus: f64,
    pub surplus_floor: i64,
}

/// One labeled data series, order preserved from sampling
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesExport {
    pub label: String,
    pub tasks: Vec<u32>,
    pub output: Vec<f64>,
}

/// Export a scenario to a JSON file
pub fn export_scenario(
    curve: &ReturnCurve,
    reports: &[MarketReport],
    series: &[(&str, &Series)],
    path: &str,
) -> std::io::Result<()> {
    let export = create_export(curve, reports, series);
    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}

/// Create the export structure from computed values
pub fn create_export(
    curve: &ReturnCurve,
    reports: &[MarketReport],
    series: &[(&str, &Series)],
) -> ScenarioExport {
    ScenarioExport {
        curve: CurveExport {
            scale: curve.scale,
            exponent: curve.exponent,
            regime: curve.regime().to_string(),
        },
        reports: reports
            .iter()
            .map(|r| MarketReportExport {
                demand: r.demand,
                clearing_tasks: r.clearing_tasks,
                divided_output: r.divided_output,
                undivided_output: r.undivided_output,
                surplus: r.surplus,
                surplus_floor: r.surplus_floor(),
            })
            .collect(),
        series: series
            .iter()
            .map(|(label, s)| SeriesExport {
                label: (*label).to_string(),
                tasks: s.xs.clone(),
                output: s.ys.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::sample;

    #[test]
    fn test_create_export_shapes() {
        let curve = ReturnCurve::new(10.0, 1.59);
        let report = MarketReport::clear(&curve, 100.0).unwrap();
        let series = sample(&curve, 1..=10).unwrap();

        let export = create_export(&curve, &[report], &[("returns", &series)]);
        assert_eq!(export.curve.regime, "increasing");
        assert_eq!(export.reports.len(), 1);
        assert_eq!(export.reports[0].clearing_tasks, 4);
        assert_eq!(export.series[0].tasks.len(), 10);
    }

    #[test]
    fn test_export_round_trips_through_json() {
        let curve = ReturnCurve::seamstress();
        let report = MarketReport::clear(&curve, 200.0).unwrap();
        let series = sample(&curve, 1..=10).unwrap();
        let export = create_export(&curve, &[report], &[("returns", &series)]);

        let json = serde_json::to_string_pretty(&export).unwrap();
        let parsed: ScenarioExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.reports[0].clearing_tasks, 6);
        assert_eq!(parsed.series[0].tasks, series.xs);
        assert_eq!(parsed.series[0].output, series.ys);
    }
}
