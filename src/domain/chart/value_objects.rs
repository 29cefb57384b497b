use derive_more::Display;

use crate::domain::analysis::PricePoint;

/// Line colour for a rising series.
pub const UP_COLOR: &str = "#22c55e";
/// Line colour for a falling series.
pub const DOWN_COLOR: &str = "#ef4444";
/// Colour used when a configured hex colour cannot be parsed.
const FALLBACK_RGB: (u8, u8, u8) = (99, 102, 241);
const FILL_ALPHA: f64 = 0.09;

/// Value Object - direction of the series from first to last close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Trend {
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "down")]
    Down,
}

impl Trend {
    /// `Up` when the last close is at or above the first.
    pub fn between(first: f64, last: f64) -> Self {
        if last >= first { Trend::Up } else { Trend::Down }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Trend::Up => UP_COLOR,
            Trend::Down => DOWN_COLOR,
        }
    }
}

/// Value Object - everything the chart backend needs to draw one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub min_value: f64,
    pub max_value: f64,
    /// Percent change first → last; `None` when the first close is zero.
    pub percent_change: Option<f64>,
    pub trend: Trend,
    pub line_color: String,
    pub fill_color: String,
    pub border_width: f64,
    pub tension: f64,
    pub point_radius: f64,
    pub point_hover_radius: f64,
    pub max_x_ticks: usize,
    pub begin_at_zero: bool,
}

impl LineChartConfig {
    /// Build the config for a chronological series. `None` for an empty one.
    pub fn from_points(points: &[PricePoint]) -> Option<Self> {
        let first = points.first()?.close;
        let last = points.last()?.close;

        let values: Vec<f64> = points.iter().map(|p| p.close).collect();
        let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let percent_change = (first != 0.0).then(|| (last - first) / first * 100.0);
        let trend = Trend::between(first, last);
        let line_color = trend.color().to_string();
        let fill_color = hex_to_rgba(&line_color, FILL_ALPHA);

        Some(Self {
            labels: points.iter().map(|p| p.date.clone()).collect(),
            values,
            min_value,
            max_value,
            percent_change,
            trend,
            line_color,
            fill_color,
            border_width: 2.0,
            tension: 0.36,
            point_radius: 0.0,
            point_hover_radius: 6.0,
            max_x_ticks: 6,
            begin_at_zero: false,
        })
    }

    /// Tooltip text for a hovered value.
    pub fn tooltip_label(value: f64) -> String {
        format!("${:.2}", value)
    }

    /// Y axis tick text.
    pub fn y_tick_label(value: f64) -> String {
        format!("${:.0}", value)
    }

    /// Signed percent change with two decimals, or "N/A".
    pub fn percent_change_label(&self) -> String {
        match self.percent_change {
            Some(pct) => format!("{:+.2}%", pct),
            None => "N/A".to_string(),
        }
    }

    /// Indices of the labels to draw on the x axis, evenly spread, first and
    /// last included.
    pub fn x_tick_indices(&self) -> Vec<usize> {
        let len = self.labels.len();
        if len <= self.max_x_ticks {
            return (0..len).collect();
        }
        let slots = self.max_x_ticks.max(2) - 1;
        let mut indices: Vec<usize> = (0..=slots).map(|i| i * (len - 1) / slots).collect();
        indices.dedup();
        indices
    }
}

/// `#rrggbb` / `#rgb` → `rgba(r, g, b, alpha)`. Unparseable input falls back
/// to the accent colour.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let (r, g, b) = match u32::from_str_radix(&expanded, 16) {
        Ok(rgb) if expanded.len() == 6 => ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        _ => FALLBACK_RGB,
    };
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(format!("2024-01-{:02}", i + 1), *c))
            .collect()
    }

    #[test]
    fn rising_series_is_green() {
        let config = LineChartConfig::from_points(&series(&[100.0, 90.0, 120.0])).unwrap();
        assert_eq!(config.trend, Trend::Up);
        assert_eq!(config.min_value, 90.0);
        assert_eq!(config.max_value, 120.0);
        assert_eq!(config.line_color, UP_COLOR);
        assert_eq!(config.fill_color, "rgba(34, 197, 94, 0.09)");
        assert_eq!(config.percent_change_label(), "+20.00%");
    }

    #[test]
    fn falling_series_is_red() {
        let config = LineChartConfig::from_points(&series(&[120.0, 90.0])).unwrap();
        assert_eq!(config.trend, Trend::Down);
        assert_eq!(config.line_color, DOWN_COLOR);
        assert_eq!(config.fill_color, "rgba(239, 68, 68, 0.09)");
    }

    #[test]
    fn flat_series_counts_as_up() {
        let config = LineChartConfig::from_points(&series(&[5.0, 5.0])).unwrap();
        assert_eq!(config.trend, Trend::Up);
        assert_eq!(config.percent_change, Some(0.0));
    }

    #[test]
    fn zero_start_has_no_percent_change() {
        let config = LineChartConfig::from_points(&series(&[0.0, 3.0])).unwrap();
        assert_eq!(config.percent_change, None);
        assert_eq!(config.percent_change_label(), "N/A");
    }

    #[test]
    fn empty_series_has_no_config() {
        assert!(LineChartConfig::from_points(&[]).is_none());
    }

    #[test]
    fn x_ticks_are_capped() {
        let config = LineChartConfig::from_points(&series(&[1.0; 25])).unwrap();
        let ticks = config.x_tick_indices();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks.first(), Some(&0));
        assert_eq!(ticks.last(), Some(&24));
    }

    #[test]
    fn axis_labels() {
        assert_eq!(LineChartConfig::tooltip_label(150.2), "$150.20");
        assert_eq!(LineChartConfig::y_tick_label(149.6), "$150");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgba("#fff", 1.0), "rgba(255, 255, 255, 1)");
        assert_eq!(hex_to_rgba(" #000000 ", 0.5), "rgba(0, 0, 0, 0.5)");
        assert_eq!(hex_to_rgba("not-a-colour", 0.09), "rgba(99, 102, 241, 0.09)");
    }
}
