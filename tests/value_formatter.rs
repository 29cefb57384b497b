use quickcheck_macros::quickcheck;
use report_chat_wasm::domain::analysis::{MetricValue, StockInfo};
use report_chat_wasm::presentation::cards::{compact_rows, stock_card};
use report_chat_wasm::presentation::formatting::{format_compact, format_currency_detailed};

#[quickcheck]
fn numbers_always_format_as_currency(n: f64) -> bool {
    let value = MetricValue::Number(n);
    format_compact(&value).starts_with('$') && format_currency_detailed(&value).starts_with('$')
}

#[quickcheck]
fn text_passes_through_unchanged(text: String) -> bool {
    let value = MetricValue::Text(text.clone());
    format_compact(&value) == text && format_currency_detailed(&value) == text
}

#[quickcheck]
fn absent_markers_never_reach_the_card(keys: Vec<String>, numbers: Vec<f64>) -> bool {
    let mut info = StockInfo::new();
    for (i, key) in keys.iter().enumerate() {
        let value = match (i % 3, numbers.get(i)) {
            (0, _) => MetricValue::Absent,
            (1, _) => MetricValue::from("N/A"),
            (_, Some(n)) => MetricValue::Number(*n),
            (_, None) => MetricValue::from("Technology"),
        };
        info.insert(format!("k{i}{key}"), value);
    }

    let expected = info.present().count();
    let rows = compact_rows(&info);
    let card = stock_card(info);
    rows.len() == expected
        && rows.iter().all(|(_, v)| v != "N/A")
        && card.html.matches(r#"class="stock-metric""#).count() == expected
}

#[test]
fn ladder_boundaries_are_exclusive() {
    let cases = [
        (999.99, "$999.99", "$999.99"),
        (1_000.0, "$1000.00", "$1000.00"),
        (1_000.01, "$1.0K", "$1.00K"),
        (1_000_000.0, "$1000.0K", "$1000.00K"),
        (1_000_000_000.0, "$1000.0M", "$1000.00M"),
        (1_500_000_000.0, "$1500.0M", "$1.50B"),
    ];
    for (n, compact, detailed) in cases {
        let value = MetricValue::Number(n);
        assert_eq!(format_compact(&value), compact, "compact {n}");
        assert_eq!(format_currency_detailed(&value), detailed, "detailed {n}");
    }
}
