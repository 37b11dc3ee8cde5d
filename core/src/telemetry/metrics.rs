use std::sync::Mutex;

/// Counts how batches were obtained over the lifetime of a data source.
pub struct LoadMetrics {
    inner: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    remote: usize,
    fallback: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSnapshot {
    pub remote: usize,
    pub fallback: usize,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_remote(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.remote += 1;
        }
    }

    pub fn record_fallback(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.fallback += 1;
        }
    }

    pub fn snapshot(&self) -> LoadSnapshot {
        if let Ok(counters) = self.inner.lock() {
            LoadSnapshot {
                remote: counters.remote,
                fallback: counters.fallback,
            }
        } else {
            LoadSnapshot::default()
        }
    }
}

impl Default for LoadMetrics {
    fn default() -> Self {
        Self::new()
    }
}
