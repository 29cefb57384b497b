use super::value_objects::LineChartConfig;
use crate::domain::analysis::PricePoint;
use crate::domain::errors::{AppError, AppResult};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// A live chart drawn on a canvas.
pub trait ChartInstance {
    /// Tear the chart down. Must tolerate being called on an instance whose
    /// canvas is already gone.
    fn destroy(&mut self);
}

/// Whatever actually draws the chart.
pub trait ChartBackend {
    type Instance: ChartInstance;

    fn create(&mut self, canvas_id: &str, config: &LineChartConfig) -> AppResult<Self::Instance>;
}

/// Binding state: at most one live instance.
#[derive(Debug)]
pub enum BindingState<I> {
    Unbound,
    Bound { instance: I, canvas_id: String, config: LineChartConfig },
}

/// Owns the single chart instance and enforces release-before-rebind.
pub struct ChartBinding<B: ChartBackend> {
    backend: B,
    state: BindingState<B::Instance>,
}

impl<B: ChartBackend> ChartBinding<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, state: BindingState::Unbound }
    }

    /// Release any existing chart, then draw `points` on `canvas_id`.
    ///
    /// Returns the config the new chart was built from. On error the binding
    /// is left `Unbound`.
    pub fn bind(&mut self, canvas_id: &str, points: &[PricePoint]) -> AppResult<&LineChartConfig> {
        self.release();

        let config = LineChartConfig::from_points(points)
            .ok_or_else(|| AppError::Validation("no price points to chart".to_string()))?;

        let instance = self.backend.create(canvas_id, &config)?;
        log_debug!(
            LogComponent::Domain("ChartBinding"),
            "bound {} points on '{}' (trend {}, {})",
            config.values.len(),
            canvas_id,
            config.trend,
            config.percent_change_label()
        );

        self.state = BindingState::Bound { instance, canvas_id: canvas_id.to_string(), config };
        self.config().ok_or_else(|| AppError::Rendering("binding lost".to_string()))
    }

    /// Destroy the live instance, if any. Idempotent.
    pub fn release(&mut self) {
        match std::mem::replace(&mut self.state, BindingState::Unbound) {
            BindingState::Bound { mut instance, canvas_id, .. } => {
                instance.destroy();
                log_debug!(LogComponent::Domain("ChartBinding"), "released chart on '{}'", canvas_id);
            }
            BindingState::Unbound => {
                log_debug!(LogComponent::Domain("ChartBinding"), "release with nothing bound");
            }
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindingState::Bound { .. })
    }

    pub fn config(&self) -> Option<&LineChartConfig> {
        match &self.state {
            BindingState::Bound { config, .. } => Some(config),
            BindingState::Unbound => None,
        }
    }

    pub fn canvas_id(&self) -> Option<&str> {
        match &self.state {
            BindingState::Bound { canvas_id, .. } => Some(canvas_id),
            BindingState::Unbound => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartBinding<B> {
    fn drop(&mut self) {
        if self.is_bound() {
            log_warn!(LogComponent::Domain("ChartBinding"), "binding dropped while bound, releasing");
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct CountingBackend {
        live: Rc<Cell<usize>>,
        created: Rc<Cell<usize>>,
        fail: bool,
    }

    struct CountingInstance {
        live: Rc<Cell<usize>>,
        destroyed: bool,
    }

    impl ChartInstance for CountingInstance {
        fn destroy(&mut self) {
            if !self.destroyed {
                self.destroyed = true;
                self.live.set(self.live.get() - 1);
            }
        }
    }

    impl ChartBackend for CountingBackend {
        type Instance = CountingInstance;

        fn create(&mut self, _canvas_id: &str, _config: &LineChartConfig) -> AppResult<CountingInstance> {
            if self.fail {
                return Err(AppError::Rendering("no 2d context".into()));
            }
            self.live.set(self.live.get() + 1);
            self.created.set(self.created.get() + 1);
            Ok(CountingInstance { live: self.live.clone(), destroyed: false })
        }
    }

    fn points() -> Vec<PricePoint> {
        vec![PricePoint::new("2024-01-01".into(), 100.0), PricePoint::new("2024-06-01".into(), 120.0)]
    }

    #[test]
    fn rebinding_releases_previous_instance() {
        let backend = CountingBackend::default();
        let live = backend.live.clone();
        let mut binding = ChartBinding::new(backend);

        binding.bind("priceChart", &points()).unwrap();
        binding.bind("priceChart", &points()).unwrap();
        binding.bind("priceChart", &points()).unwrap();

        assert_eq!(live.get(), 1);
        assert_eq!(binding.backend().created.get(), 3);
        assert!(binding.is_bound());
        assert_eq!(binding.canvas_id(), Some("priceChart"));
    }

    #[test]
    fn release_is_idempotent() {
        let backend = CountingBackend::default();
        let live = backend.live.clone();
        let mut binding = ChartBinding::new(backend);
        binding.release();
        binding.bind("c", &points()).unwrap();
        binding.release();
        binding.release();
        assert_eq!(live.get(), 0);
        assert!(!binding.is_bound());
    }

    #[test]
    fn empty_series_unbinds_and_errors() {
        let backend = CountingBackend::default();
        let live = backend.live.clone();
        let mut binding = ChartBinding::new(backend);
        binding.bind("c", &points()).unwrap();
        assert!(matches!(binding.bind("c", &[]), Err(AppError::Validation(_))));
        assert_eq!(live.get(), 0);
        assert!(binding.config().is_none());
    }

    #[test]
    fn backend_failure_leaves_unbound() {
        let backend = CountingBackend { fail: true, ..Default::default() };
        let mut binding = ChartBinding::new(backend);
        assert!(binding.bind("c", &points()).is_err());
        assert!(!binding.is_bound());
    }

    #[test]
    fn drop_releases_instance() {
        let backend = CountingBackend::default();
        let live = backend.live.clone();
        {
            let mut binding = ChartBinding::new(backend);
            binding.bind("c", &points()).unwrap();
            assert_eq!(live.get(), 1);
        }
        assert_eq!(live.get(), 0);
    }
}
