//! Value formatting for metric displays.

use crate::domain::analysis::MetricValue;

/// Magnitude ladder: thresholds high → low, suffix, decimals.
struct Ladder {
    tiers: &'static [(f64, &'static str)],
    decimals: usize,
}

/// Inline cards: one decimal, K / M.
const COMPACT: Ladder = Ladder { tiers: &[(1e6, "M"), (1e3, "K")], decimals: 1 };

/// Report widget: two decimals, K / M / B.
const DETAILED: Ladder = Ladder { tiers: &[(1e9, "B"), (1e6, "M"), (1e3, "K")], decimals: 2 };

impl Ladder {
    fn format(&self, value: &MetricValue) -> String {
        let number = match value {
            MetricValue::Number(n) => *n,
            MetricValue::Text(text) => return text.clone(),
            MetricValue::Absent => return "N/A".to_string(),
        };

        for (threshold, suffix) in self.tiers {
            if number > *threshold {
                return format!("${:.*}{}", self.decimals, number / threshold, suffix);
            }
        }
        format!("${:.2}", number)
    }
}

/// Compact currency for cards: `$1.5K`, `$2.3M`, `$12.00`.
pub fn format_compact(value: &MetricValue) -> String {
    COMPACT.format(value)
}

/// Detailed currency for the report widget: `$1.50K`, `$2.35M`, `$2.50B`.
pub fn format_currency_detailed(value: &MetricValue) -> String {
    DETAILED.format(value)
}

/// `currentPrice` → `Current Price`, `52WeekHigh` → `52 Week High`.
pub fn metric_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> MetricValue {
        MetricValue::Number(n)
    }

    #[test]
    fn compact_ladder() {
        assert_eq!(format_compact(&num(150.2)), "$150.20");
        assert_eq!(format_compact(&num(1000.0)), "$1000.00");
        assert_eq!(format_compact(&num(1500.0)), "$1.5K");
        assert_eq!(format_compact(&num(2_345_678.0)), "$2.3M");
        assert_eq!(format_compact(&num(2.5e12)), "$2500000.0M");
    }

    #[test]
    fn detailed_ladder() {
        assert_eq!(format_currency_detailed(&num(150.2)), "$150.20");
        assert_eq!(format_currency_detailed(&num(1500.0)), "$1.50K");
        assert_eq!(format_currency_detailed(&num(2_345_678.0)), "$2.35M");
        assert_eq!(format_currency_detailed(&num(2_500_000_000.0)), "$2.50B");
        assert_eq!(format_currency_detailed(&num(2.5e12)), "$2500.00B");
    }

    #[test]
    fn negative_values_skip_the_ladder() {
        assert_eq!(format_compact(&num(-5_000_000.0)), "$-5000000.00");
    }

    #[test]
    fn text_passes_through() {
        assert_eq!(format_compact(&MetricValue::from("Technology")), "Technology");
        assert_eq!(format_currency_detailed(&MetricValue::from("AAPL")), "AAPL");
    }

    #[test]
    fn labels() {
        assert_eq!(metric_label("currentPrice"), "Current Price");
        assert_eq!(metric_label("marketCap"), "Market Cap");
        assert_eq!(metric_label("52WeekHigh"), "52 Week High");
        assert_eq!(metric_label("trailingPE"), "Trailing P E");
        assert_eq!(metric_label("ticker"), "Ticker");
        assert_eq!(metric_label(""), "");
    }
}
