//! The standard division-of-labour figures, composed from sampled series
//! and chart primitives.
//!
//! Each figure has an image builder (pure, returns the rendered
//! `RgbImage`) and a thin wrapper that saves it as PNG.

use std::error::Error;

use image::RgbImage;

use crate::chart::{
    compose_panels, ChartBounds, ChartCanvas, LineStyle, BASELINE_BLUE, CURVE_DARK_RED,
    CURVE_ORANGE, DEMAND_NAVY, GUIDE_GREY,
};
use crate::piecewise::PiecewiseCurve;
use crate::returns::{DomainError, ReturnCurve, ReturnsRegime};
use crate::series::{linear_baseline, sample};

const PANEL_WIDTH: u32 = 360;
const PANEL_HEIGHT: u32 = 300;
const FIGURE_WIDTH: u32 = 520;
const FIGURE_HEIGHT: u32 = 390;

fn regime_color(regime: ReturnsRegime) -> [u8; 3] {
    match regime {
        ReturnsRegime::Decreasing => CURVE_DARK_RED,
        ReturnsRegime::Constant => BASELINE_BLUE,
        ReturnsRegime::Increasing => CURVE_ORANGE,
    }
}

/// Tick positions for a sampled task range: every task count when the
/// range is short, otherwise the first count plus multiples of five.
fn tick_marks(xs: &[u32]) -> Vec<u32> {
    if xs.len() <= 12 {
        xs.to_vec()
    } else {
        xs.iter()
            .copied()
            .filter(|&x| x == xs[0] || x % 5 == 0)
            .collect()
    }
}

/// One panel per returns regime (gamma 0.5, 1.0, 1.5), side by side.
///
/// Panels are scaled independently so each regime's shape stays visible.
pub fn returns_comparison_image(scale: f64, max_tasks: u32) -> Result<RgbImage, DomainError> {
    let mut panels = Vec::with_capacity(ReturnsRegime::all().len());
    for &regime in ReturnsRegime::all() {
        let curve = ReturnCurve::new(scale, regime.sample_exponent());
        let series = sample(&curve, 1..=max_tasks)?;
        let bounds = ChartBounds::covering(&[&series]);

        let mut canvas = ChartCanvas::new(PANEL_WIDTH, PANEL_HEIGHT, bounds);
        canvas.draw_axes();
        canvas.draw_x_ticks(&tick_marks(&series.xs));
        canvas.draw_series(&series, regime_color(regime));
        panels.push(canvas.into_image());
    }
    Ok(compose_panels(panels))
}

/// Save the regime-comparison figure as PNG.
pub fn render_returns_comparison(
    scale: f64,
    max_tasks: u32,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    returns_comparison_image(scale, max_tasks)?.save(path)?;
    Ok(())
}

/// The market-clearing figure: returns curve, undivided baseline, a
/// dashed guide at the demand level and a dotted guide at the clearing
/// task count.
pub fn market_clearing_image(
    curve: &ReturnCurve,
    demand: f64,
    max_tasks: u32,
) -> Result<RgbImage, DomainError> {
    let clearing_tasks = curve.clearing_tasks(demand)?;
    let series = sample(curve, 1..=max_tasks)?;
    let baseline = linear_baseline(curve.scale, 1..=max_tasks);
    let bounds = ChartBounds::covering(&[&series, &baseline]).include_level(demand);

    let mut canvas = ChartCanvas::new(FIGURE_WIDTH, FIGURE_HEIGHT, bounds);
    canvas.draw_axes();
    canvas.draw_x_ticks(&tick_marks(&series.xs));
    canvas.draw_hline(demand, DEMAND_NAVY, LineStyle::Dashed);
    canvas.draw_vline(clearing_tasks as f64, GUIDE_GREY, LineStyle::Dotted);
    canvas.draw_series(&baseline, BASELINE_BLUE);
    canvas.draw_series(&series, CURVE_ORANGE);
    Ok(canvas.into_image())
}

/// Save the market-clearing figure as PNG.
pub fn render_market_clearing(
    curve: &ReturnCurve,
    demand: f64,
    max_tasks: u32,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    market_clearing_image(curve, demand, max_tasks)?.save(path)?;
    Ok(())
}

/// The two-regime figure: piecewise curve, undivided baseline and dotted
/// guides at task counts and output levels of interest.
pub fn two_regime_image(
    curve: &PiecewiseCurve,
    max_tasks: u32,
    task_guides: &[u32],
    output_guides: &[f64],
) -> Result<RgbImage, DomainError> {
    let series = sample(curve, 1..=max_tasks)?;
    let baseline = linear_baseline(curve.scale, 1..=max_tasks);
    let mut bounds = ChartBounds::covering(&[&series, &baseline]);
    for &level in output_guides {
        bounds = bounds.include_level(level);
    }

    let mut canvas = ChartCanvas::new(FIGURE_WIDTH, FIGURE_HEIGHT, bounds);
    canvas.draw_axes();
    canvas.draw_x_ticks(&tick_marks(&series.xs));
    for &tasks in task_guides {
        canvas.draw_vline(tasks as f64, GUIDE_GREY, LineStyle::Dotted);
    }
    for &level in output_guides {
        canvas.draw_hline(level, GUIDE_GREY, LineStyle::Dotted);
    }
    canvas.draw_series(&baseline, BASELINE_BLUE);
    canvas.draw_series(&series, CURVE_DARK_RED);
    Ok(canvas.into_image())
}

/// Save the two-regime figure as PNG.
pub fn render_two_regime(
    curve: &PiecewiseCurve,
    max_tasks: u32,
    task_guides: &[u32],
    output_guides: &[f64],
    path: &str,
) -> Result<(), Box<dyn Error>> {
    two_regime_image(curve, max_tasks, task_guides, output_guides)?.save(path)?;
    Ok(())
}
