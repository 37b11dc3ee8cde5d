use crate::filter::{Facet, FacetSelection, FilterState};
use crate::presenter::{GlobePresenter, RenderSurface};
use crate::record::{Frequency, Polarization};
use crate::source::{BatchOrigin, LoadOutcome};
use crate::stats::{StatEntry, StatsPanel};
use crate::telemetry::LogManager;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One globe view: filter state publishing to a presenter and a stats panel.
///
/// Components are explicit instances owned here rather than shared globals;
/// the presenter is notified before the stats panel on every change.
pub struct SarDashboard<S: RenderSurface + Send + 'static> {
    filter: FilterState,
    presenter: Arc<Mutex<GlobePresenter<S>>>,
    stats: Arc<Mutex<StatsPanel>>,
    origin: Option<BatchOrigin>,
    logger: LogManager,
}

impl<S: RenderSurface + Send + 'static> SarDashboard<S> {
    pub fn new(presenter: GlobePresenter<S>) -> Self {
        let presenter = Arc::new(Mutex::new(presenter));
        let stats = Arc::new(Mutex::new(StatsPanel::new()));
        let mut filter = FilterState::new();
        filter.subscribe(presenter.clone());
        filter.subscribe(stats.clone());
        Self {
            filter,
            presenter,
            stats,
            origin: None,
            logger: LogManager::new("dashboard"),
        }
    }

    /// Installs a freshly loaded batch, keeping the current facet selection.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { batch, origin } = outcome;
        if let BatchOrigin::Fallback { reason } = &origin {
            self.logger
                .record(&format!("showing generated data ({})", reason));
        }
        self.origin = Some(origin);
        self.filter.set_batch(batch);
    }

    pub fn set_frequency(&mut self, frequency: Facet<Frequency>) {
        self.filter.set_frequency(frequency);
    }

    pub fn set_polarization(&mut self, polarization: Facet<Polarization>) {
        self.filter.set_polarization(polarization);
    }

    pub fn set_selection(&mut self, selection: FacetSelection) {
        self.filter.set_selection(selection);
    }

    pub fn selection(&self) -> FacetSelection {
        self.filter.selection()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn origin(&self) -> Option<&BatchOrigin> {
        self.origin.as_ref()
    }

    /// Runs `f` against the presenter; `None` if its lock was poisoned.
    pub fn with_presenter<R>(&self, f: impl FnOnce(&mut GlobePresenter<S>) -> R) -> Option<R> {
        self.presenter.lock().ok().map(|mut presenter| f(&mut presenter))
    }

    pub fn stats_entries(&self) -> Vec<StatEntry> {
        self.stats
            .lock()
            .map(|panel| panel.entries().to_vec())
            .unwrap_or_default()
    }

    pub fn total_points(&self) -> usize {
        self.stats.lock().map(|panel| panel.total()).unwrap_or(0)
    }

    pub fn start(&self) -> bool {
        self.with_presenter(|presenter| presenter.start())
            .unwrap_or(false)
    }

    pub fn tick(&self, dt: Duration) -> bool {
        self.with_presenter(|presenter| presenter.tick(dt))
            .unwrap_or(false)
    }

    pub fn dispose(&self) {
        self.with_presenter(|presenter| presenter.dispose());
    }
}
