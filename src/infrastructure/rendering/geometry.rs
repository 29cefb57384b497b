//! Pixel geometry for the line chart. Pure math, no canvas calls.

use crate::domain::chart::LineChartConfig;

/// Fraction of the value range added above and below the series.
const Y_PADDING_RATIO: f64 = 0.08;
pub const Y_TICK_COUNT: usize = 5;

/// Plot margins in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { left: 56.0, right: 16.0, top: 16.0, bottom: 32.0 }
    }
}

/// Maps series indices and values to canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub y_min: f64,
    pub y_max: f64,
    pub count: usize,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, config: &LineChartConfig) -> Self {
        let (y_min, y_max) = padded_range(config.min_value, config.max_value, config.begin_at_zero);
        Self {
            width,
            height,
            margins: Margins::default(),
            y_min,
            y_max,
            count: config.values.len(),
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(1.0)
    }

    pub fn plot_bottom(&self) -> f64 {
        self.margins.top + self.plot_height()
    }

    /// X of the `index`-th point. A single point sits in the middle.
    pub fn x(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.margins.left + self.plot_width() / 2.0;
        }
        self.margins.left + index as f64 * self.plot_width() / (self.count - 1) as f64
    }

    pub fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.y_min) / (self.y_max - self.y_min);
        self.plot_bottom() - ratio * self.plot_height()
    }

    /// Evenly spaced tick values from bottom to top.
    pub fn y_ticks(&self) -> Vec<f64> {
        let step = (self.y_max - self.y_min) / (Y_TICK_COUNT - 1) as f64;
        (0..Y_TICK_COUNT).map(|i| self.y_min + step * i as f64).collect()
    }

    /// Index of the point closest to `x`, if the series is not empty.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        match self.count {
            0 => None,
            1 => Some(0),
            n => {
                let step = self.plot_width() / (n - 1) as f64;
                let raw = ((x - self.margins.left) / step).round();
                Some(raw.clamp(0.0, (n - 1) as f64) as usize)
            }
        }
    }

    pub fn points(&self, values: &[f64]) -> Vec<(f64, f64)> {
        values.iter().enumerate().map(|(i, v)| (self.x(i), self.y(*v))).collect()
    }
}

fn padded_range(min: f64, max: f64, begin_at_zero: bool) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 { span * Y_PADDING_RATIO } else { max.abs().max(1.0) * Y_PADDING_RATIO };
    let low = if begin_at_zero { min.min(0.0) } else { min - pad };
    (low, max + pad)
}

/// Bezier control points `(cp1, cp2)` for each segment `i → i+1`.
///
/// Each point's tangent follows its neighbours, scaled by `tension`; zero
/// tension yields straight segments.
pub fn control_points(points: &[(f64, f64)], tension: f64) -> Vec<((f64, f64), (f64, f64))> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let tangent = |i: usize| {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(n - 1)];
        ((next.0 - prev.0) * tension / 2.0, (next.1 - prev.1) * tension / 2.0)
    };

    (0..n - 1)
        .map(|i| {
            let (p0, p1) = (points[i], points[i + 1]);
            let (t0, t1) = (tangent(i), tangent(i + 1));
            ((p0.0 + t0.0 / 1.5, p0.1 + t0.1 / 1.5), (p1.0 - t1.0 / 1.5, p1.1 - t1.1 / 1.5))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::PricePoint;

    fn config(closes: &[f64]) -> LineChartConfig {
        let points: Vec<PricePoint> = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(format!("2024-01-{:02}", i + 1), *c))
            .collect();
        LineChartConfig::from_points(&points).unwrap()
    }

    #[test]
    fn extremes_land_inside_the_plot() {
        let layout = ChartLayout::new(400.0, 200.0, &config(&[100.0, 120.0, 90.0]));
        let top = layout.y(120.0);
        let bottom = layout.y(90.0);
        assert!(top > layout.margins.top && top < bottom);
        assert!(bottom < layout.plot_bottom());
        assert_eq!(layout.x(0), layout.margins.left);
        assert_eq!(layout.x(2), layout.width - layout.margins.right);
    }

    #[test]
    fn flat_series_has_a_usable_range() {
        let layout = ChartLayout::new(400.0, 200.0, &config(&[50.0, 50.0]));
        assert!(layout.y_max > layout.y_min);
        assert!(layout.y(50.0).is_finite());
    }

    #[test]
    fn nearest_index_clamps() {
        let layout = ChartLayout::new(400.0, 200.0, &config(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(layout.nearest_index(-100.0), Some(0));
        assert_eq!(layout.nearest_index(10_000.0), Some(3));
        assert_eq!(layout.nearest_index(layout.x(2) + 1.0), Some(2));
    }

    #[test]
    fn zero_tension_is_straight() {
        let pts = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)];
        let cps = control_points(&pts, 0.0);
        assert_eq!(cps, vec![((0.0, 0.0), (10.0, 10.0)), ((10.0, 10.0), (20.0, 0.0))]);
    }

    #[test]
    fn one_segment_per_gap() {
        assert!(control_points(&[(0.0, 0.0)], 0.36).is_empty());
        assert_eq!(control_points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], 0.36).len(), 2);
    }
}
