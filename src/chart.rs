//! PNG chart primitives: a white canvas with a margined plot area,
//! data-space projection, polylines and dashed/dotted guide lines.
//!
//! Charts are geometry-only (axes, ticks, series, guides); labels and
//! titles stay on the console side.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::series::Series;

// Palette for the standard figures
pub const CURVE_DARK_RED: [u8; 3] = [139, 0, 0];
pub const CURVE_ORANGE: [u8; 3] = [255, 140, 0];
pub const BASELINE_BLUE: [u8; 3] = [95, 158, 160];
pub const DEMAND_NAVY: [u8; 3] = [25, 25, 112];
pub const GUIDE_GREY: [u8; 3] = [128, 128, 128];
pub const AXIS_GREY: [u8; 3] = [70, 70, 70];
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Stroke pattern for lines and guides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// 6 pixels on, 6 off
    Dashed,
    /// 1 pixel on, 3 off
    Dotted,
}

impl LineStyle {
    /// Whether the pixel at `step` along the stroke is drawn.
    fn draws_at(self, step: u32) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed => (step / 6) % 2 == 0,
            Self::Dotted => step % 4 == 0,
        }
    }
}

/// Data-space window shown by a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartBounds {
    /// Window covering every point of the given series, with the y axis
    /// anchored at zero and a little headroom above the tallest point.
    pub fn covering(series: &[&Series]) -> Self {
        let mut x_min = f64::MAX;
        let mut x_max = f64::MIN;
        let mut y_max = f64::MIN;
        for s in series {
            for (x, y) in s.points() {
                x_min = x_min.min(x as f64);
                x_max = x_max.max(x as f64);
                y_max = y_max.max(y);
            }
        }
        Self {
            x_min,
            x_max,
            y_min: 0.0,
            y_max: y_max * 1.05,
        }
    }

    /// Extend the window upward so a horizontal guide stays visible.
    pub fn include_level(mut self, level: f64) -> Self {
        if level * 1.05 > self.y_max {
            self.y_max = level * 1.05;
        }
        self
    }
}

/// A chart in progress: an RGB image plus the projection from data space
/// into its margined plot area.
pub struct ChartCanvas {
    img: RgbImage,
    width: u32,
    height: u32,
    margin: u32,
    bounds: ChartBounds,
}

impl ChartCanvas {
    /// Create a white canvas of the given pixel size.
    pub fn new(width: u32, height: u32, bounds: ChartBounds) -> Self {
        let mut img: RgbImage = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(BACKGROUND);
        }
        Self {
            img,
            width,
            height,
            margin: 30,
            bounds,
        }
    }

    /// Project a data point into pixel coordinates.
    pub fn project(&self, x: f64, y: f64) -> (i64, i64) {
        let plot_w = (self.width - 2 * self.margin) as f64;
        let plot_h = (self.height - 2 * self.margin) as f64;
        let x_span = (self.bounds.x_max - self.bounds.x_min).max(f64::EPSILON);
        let y_span = (self.bounds.y_max - self.bounds.y_min).max(f64::EPSILON);

        let px = self.margin as f64 + (x - self.bounds.x_min) / x_span * plot_w;
        let py = (self.height - self.margin) as f64 - (y - self.bounds.y_min) / y_span * plot_h;
        (px.round() as i64, py.round() as i64)
    }

    fn put_pixel_checked(&mut self, px: i64, py: i64, color: [u8; 3]) {
        if px >= 0 && py >= 0 && (px as u32) < self.width && (py as u32) < self.height {
            self.img.put_pixel(px as u32, py as u32, Rgb(color));
        }
    }

    /// Bresenham line between two pixel positions, honoring the stroke
    /// pattern.
    fn draw_line_px(
        &mut self,
        (x0, y0): (i64, i64),
        (x1, y1): (i64, i64),
        color: [u8; 3],
        style: LineStyle,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let mut step = 0u32;

        loop {
            if style.draws_at(step) {
                self.put_pixel_checked(x, y, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            step += 1;
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Left and bottom axis lines at the window edges.
    pub fn draw_axes(&mut self) {
        let origin = self.project(self.bounds.x_min, self.bounds.y_min);
        let x_end = self.project(self.bounds.x_max, self.bounds.y_min);
        let y_end = self.project(self.bounds.x_min, self.bounds.y_max);
        self.draw_line_px(origin, x_end, AXIS_GREY, LineStyle::Solid);
        self.draw_line_px(origin, y_end, AXIS_GREY, LineStyle::Solid);
    }

    /// Tick marks below the bottom axis at the given task counts.
    pub fn draw_x_ticks(&mut self, ticks: &[u32]) {
        for &tick in ticks {
            let (px, py) = self.project(tick as f64, self.bounds.y_min);
            for dy in 0..4 {
                self.put_pixel_checked(px, py + dy, AXIS_GREY);
            }
        }
    }

    /// Polyline through a sampled series.
    pub fn draw_series(&mut self, series: &Series, color: [u8; 3]) {
        let mut previous: Option<(i64, i64)> = None;
        for (x, y) in series.points() {
            let point = self.project(x as f64, y);
            if let Some(last) = previous {
                self.draw_line_px(last, point, color, LineStyle::Solid);
            }
            previous = Some(point);
        }
    }

    /// Horizontal guide across the plot area at an output level.
    pub fn draw_hline(&mut self, level: f64, color: [u8; 3], style: LineStyle) {
        let start = self.project(self.bounds.x_min, level);
        let end = self.project(self.bounds.x_max, level);
        self.draw_line_px(start, end, color, style);
    }

    /// Vertical guide across the plot area at a task count.
    pub fn draw_vline(&mut self, tasks: f64, color: [u8; 3], style: LineStyle) {
        let start = self.project(tasks, self.bounds.y_min);
        let end = self.project(tasks, self.bounds.y_max);
        self.draw_line_px(start, end, color, style);
    }

    /// Finish the chart and take the rendered image.
    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Finish the chart and save it as PNG.
    pub fn save(self, path: &str) -> Result<(), image::ImageError> {
        self.img.save(path)
    }
}

/// Compose panels side by side into a single image.
pub fn compose_panels(panels: Vec<RgbImage>) -> RgbImage {
    let width: u32 = panels.iter().map(|p| p.width()).sum();
    let height: u32 = panels.iter().map(|p| p.height()).max().unwrap_or(0);
    let mut combined: RgbImage = ImageBuffer::from_pixel(width, height, Rgb(BACKGROUND));

    let mut x_offset: i64 = 0;
    for panel in panels {
        image::imageops::replace(&mut combined, &panel, x_offset, 0);
        x_offset += panel.width() as i64;
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_pixels(img: &RgbImage, color: [u8; 3]) -> usize {
        img.pixels().filter(|p| p.0 == color).count()
    }

    #[test]
    fn test_projection_corners() {
        let bounds = ChartBounds {
            x_min: 1.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 100.0,
        };
        let canvas = ChartCanvas::new(400, 300, bounds);
        assert_eq!(canvas.project(1.0, 0.0), (30, 270));
        assert_eq!(canvas.project(10.0, 0.0), (370, 270));
        assert_eq!(canvas.project(1.0, 100.0), (30, 30));
    }

    #[test]
    fn test_line_style_patterns() {
        assert!(LineStyle::Solid.draws_at(0) && LineStyle::Solid.draws_at(17));
        assert!(LineStyle::Dashed.draws_at(0));
        assert!(!LineStyle::Dashed.draws_at(6));
        assert!(LineStyle::Dotted.draws_at(0));
        assert!(!LineStyle::Dotted.draws_at(1));
        assert!(LineStyle::Dotted.draws_at(4));
    }

    #[test]
    fn test_series_leaves_pixels() {
        let series = Series {
            xs: vec![1, 2, 3],
            ys: vec![10.0, 20.0, 30.0],
        };
        let bounds = ChartBounds::covering(&[&series]);
        let mut canvas = ChartCanvas::new(200, 150, bounds);
        canvas.draw_series(&series, CURVE_ORANGE);
        let img = canvas.into_image();
        assert!(count_pixels(&img, CURVE_ORANGE) > 100);
    }

    #[test]
    fn test_dashed_guide_has_gaps() {
        let bounds = ChartBounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        let mut canvas = ChartCanvas::new(300, 200, bounds);
        canvas.draw_hline(5.0, DEMAND_NAVY, LineStyle::Dashed);
        let img = canvas.into_image();
        let drawn = count_pixels(&img, DEMAND_NAVY);
        // Roughly half of a 241-pixel span
        assert!(drawn > 60 && drawn < 200);
    }

    #[test]
    fn test_bounds_cover_series_and_levels() {
        let series = Series {
            xs: vec![1, 2],
            ys: vec![5.0, 50.0],
        };
        let bounds = ChartBounds::covering(&[&series]);
        assert!((bounds.x_min - 1.0).abs() < 1e-12);
        assert!((bounds.x_max - 2.0).abs() < 1e-12);
        assert!(bounds.y_max >= 50.0);

        let raised = bounds.include_level(200.0);
        assert!(raised.y_max >= 200.0);
    }

    #[test]
    fn test_compose_panels_width() {
        let a: RgbImage = ImageBuffer::from_pixel(100, 80, Rgb(BACKGROUND));
        let b: RgbImage = ImageBuffer::from_pixel(120, 80, Rgb(BACKGROUND));
        let combined = compose_panels(vec![a, b]);
        assert_eq!(combined.width(), 220);
        assert_eq!(combined.height(), 80);
    }
}
