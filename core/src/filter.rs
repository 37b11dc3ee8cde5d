use crate::prelude::SharedObserver;
use crate::record::{Frequency, Polarization, RecordBatch, SarRecord, VisibleSet};
use crate::telemetry::LogManager;
use std::fmt;
use std::str::FromStr;

/// A facet constraint: either everything, or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet<T> {
    All,
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Copy> Facet<T> {
    /// `All` followed by every concrete value, in control order.
    pub fn options(values: &[T]) -> Vec<Facet<T>> {
        std::iter::once(Facet::All)
            .chain(values.iter().copied().map(Facet::Only))
            .collect()
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str("all"),
            Facet::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Facet::All)
        } else {
            trimmed.parse().map(Facet::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FacetSelection {
    pub frequency: Facet<Frequency>,
    pub polarization: Facet<Polarization>,
}

impl FacetSelection {
    pub fn new(frequency: Facet<Frequency>, polarization: Facet<Polarization>) -> Self {
        Self {
            frequency,
            polarization,
        }
    }

    pub fn accepts(&self, record: &SarRecord) -> bool {
        self.frequency.matches(&record.frequency) && self.polarization.matches(&record.polarization)
    }
}

/// Records of `batch` accepted by every facet of `selection`, in batch order.
pub fn apply(batch: &RecordBatch, selection: &FacetSelection) -> VisibleSet {
    let indices = batch
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.accepts(record))
        .map(|(idx, _)| idx)
        .collect();
    VisibleSet::from_indices(batch, indices)
}

/// Current batch and facet selection; publishes the derived subset on every change.
pub struct FilterState {
    batch: RecordBatch,
    selection: FacetSelection,
    visible: VisibleSet,
    subscribers: Vec<SharedObserver>,
    logger: LogManager,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            batch: RecordBatch::default(),
            selection: FacetSelection::default(),
            visible: VisibleSet::default(),
            subscribers: Vec::new(),
            logger: LogManager::new("filter"),
        }
    }

    /// Registers an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: SharedObserver) {
        self.subscribers.push(observer);
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn selection(&self) -> FacetSelection {
        self.selection
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn set_batch(&mut self, batch: RecordBatch) {
        self.batch = batch;
        self.refresh();
    }

    pub fn set_frequency(&mut self, frequency: Facet<Frequency>) {
        self.selection.frequency = frequency;
        self.refresh();
    }

    pub fn set_polarization(&mut self, polarization: Facet<Polarization>) {
        self.selection.polarization = polarization;
        self.refresh();
    }

    pub fn set_selection(&mut self, selection: FacetSelection) {
        self.selection = selection;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = apply(&self.batch, &self.selection);
        self.logger.detail(&format!(
            "frequency={} polarization={} -> {}/{} records",
            self.selection.frequency,
            self.selection.polarization,
            self.visible.len(),
            self.batch.len()
        ));
        self.publish();
    }

    fn publish(&self) {
        for subscriber in &self.subscribers {
            match subscriber.lock() {
                Ok(mut observer) => observer.on_visible_set(&self.visible),
                Err(_) => self.logger.warn("skipping poisoned subscriber"),
            }
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::VisibleSetObserver;
    use crate::record::batch::fixtures::mixed_records;
    use std::sync::{Arc, Mutex};

    fn ids(visible: &VisibleSet) -> Vec<String> {
        visible.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn all_all_keeps_every_record() {
        let batch = RecordBatch::new(mixed_records());
        let visible = apply(&batch, &FacetSelection::default());
        assert_eq!(ids(&visible), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn every_selection_is_the_predicate_intersection() {
        let batch = RecordBatch::new(mixed_records());
        for frequency in Facet::options(&Frequency::ALL) {
            for polarization in Facet::options(&Polarization::ALL) {
                let selection = FacetSelection::new(frequency, polarization);
                let visible = apply(&batch, &selection);
                let expected: Vec<String> = batch
                    .iter()
                    .filter(|r| frequency.matches(&r.frequency))
                    .filter(|r| polarization.matches(&r.polarization))
                    .map(|r| r.id.clone())
                    .collect();
                assert_eq!(ids(&visible), expected, "{frequency}/{polarization}");
                assert!(visible.len() <= batch.len());
            }
        }
    }

    #[test]
    fn facet_parses_all_and_values() {
        assert_eq!("all".parse::<Facet<Frequency>>().unwrap(), Facet::All);
        assert_eq!("".parse::<Facet<Polarization>>().unwrap(), Facet::All);
        assert_eq!(
            "L-band".parse::<Facet<Frequency>>().unwrap(),
            Facet::Only(Frequency::LBand)
        );
        assert!("Q".parse::<Facet<Polarization>>().is_err());
    }

    #[derive(Default, Debug)]
    struct Recorder {
        sizes: Vec<usize>,
    }

    impl VisibleSetObserver for Recorder {
        fn on_visible_set(&mut self, visible: &VisibleSet) {
            self.sizes.push(visible.len());
        }
    }

    #[test]
    fn subscribers_receive_each_change_in_order() {
        let first = Arc::new(Mutex::new(Recorder::default()));
        let second = Arc::new(Mutex::new(Recorder::default()));
        let mut state = FilterState::new();
        state.subscribe(first.clone());
        state.subscribe(second.clone());

        state.set_batch(RecordBatch::new(mixed_records()));
        state.set_frequency(Facet::Only(Frequency::LBand));
        state.set_polarization(Facet::Only(Polarization::Hv));
        state.set_selection(FacetSelection::default());

        assert_eq!(first.lock().unwrap().sizes, vec![5, 3, 1, 5]);
        assert_eq!(second.lock().unwrap().sizes, first.lock().unwrap().sizes);
    }

    #[test]
    fn poisoned_subscriber_is_skipped_and_later_ones_still_notified() {
        let poisoned = Arc::new(Mutex::new(Recorder::default()));
        let healthy = Arc::new(Mutex::new(Recorder::default()));
        let mut state = FilterState::new();
        state.subscribe(poisoned.clone());
        state.subscribe(healthy.clone());

        let holder = poisoned.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("observer crashed while rendering");
        })
        .join();
        assert!(crashed.is_err());
        assert!(poisoned.is_poisoned());

        state.set_batch(RecordBatch::new(mixed_records()));
        state.set_frequency(Facet::Only(Frequency::LBand));

        assert_eq!(healthy.lock().unwrap().sizes, vec![5, 3]);
        let untouched = poisoned.lock().unwrap_err().into_inner().sizes.clone();
        assert!(untouched.is_empty());
    }
}
