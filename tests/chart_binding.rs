use std::cell::Cell;
use std::rc::Rc;

use quickcheck_macros::quickcheck;
use report_chat_wasm::domain::analysis::PricePoint;
use report_chat_wasm::domain::chart::{ChartBackend, ChartBinding, ChartInstance, LineChartConfig, Trend};
use report_chat_wasm::domain::errors::AppResult;

#[derive(Default)]
struct LiveCounter {
    live: Rc<Cell<usize>>,
}

struct Counted(Rc<Cell<usize>>);

impl ChartInstance for Counted {
    fn destroy(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl ChartBackend for LiveCounter {
    type Instance = Counted;

    fn create(&mut self, _canvas_id: &str, _config: &LineChartConfig) -> AppResult<Counted> {
        self.live.set(self.live.get() + 1);
        Ok(Counted(Rc::clone(&self.live)))
    }
}

fn series(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| PricePoint::new(format!("day-{i}"), *c))
        .collect()
}

#[quickcheck]
fn n_binds_leave_one_live_instance(n: u8) -> bool {
    let backend = LiveCounter::default();
    let live = Rc::clone(&backend.live);
    let mut binding = ChartBinding::new(backend);

    let points = series(&[100.0, 120.0]);
    let binds = (n % 32) as usize + 1;
    for _ in 0..binds {
        if binding.bind("priceChart", &points).is_err() {
            return false;
        }
    }
    live.get() == 1 && binding.is_bound()
}

#[quickcheck]
fn trend_and_extrema_follow_the_series(closes: Vec<u16>) -> bool {
    let closes: Vec<f64> = closes.into_iter().map(f64::from).collect();
    let Some(config) = LineChartConfig::from_points(&series(&closes)) else {
        return closes.is_empty();
    };

    let first = closes[0];
    let last = closes[closes.len() - 1];
    let expected = if last >= first { Trend::Up } else { Trend::Down };

    config.trend == expected
        && closes.iter().all(|c| *c >= config.min_value && *c <= config.max_value)
        && config.labels.len() == closes.len()
        && config.x_tick_indices().len() <= config.max_x_ticks
}

#[test]
fn apple_series_rises_twenty_percent() {
    let backend = LiveCounter::default();
    let mut binding = ChartBinding::new(backend);
    let config = binding
        .bind("priceChart", &series(&[100.0, 120.0]))
        .unwrap()
        .clone();
    assert_eq!(config.trend, Trend::Up);
    assert_eq!(config.percent_change_label(), "+20.00%");
    assert_eq!(config.line_color, "#22c55e");
    assert!(!config.begin_at_zero);
}
