use crate::prelude::{LoadError, LoadResult};
use crate::record::{RecordBatch, SarRecord};
use crate::source::fallback::FallbackGenerator;
use crate::telemetry::{LoadMetrics, LogManager};
use std::future::Future;
use std::sync::Arc;

/// One attempt at obtaining records from the real data source.
pub trait RecordFetcher {
    fn fetch(&self) -> impl Future<Output = LoadResult<Vec<SarRecord>>> + Send;
}

/// Where a loaded batch came from.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOrigin {
    Remote,
    Fallback { reason: LoadError },
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub batch: RecordBatch,
    pub origin: BatchOrigin,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, BatchOrigin::Fallback { .. })
    }
}

/// Loads a batch from the fetcher, substituting generated records on any failure.
#[derive(Clone)]
pub struct DataSource<F> {
    fetcher: F,
    fallback: FallbackGenerator,
    metrics: Arc<LoadMetrics>,
    logger: LogManager,
}

impl<F: RecordFetcher> DataSource<F> {
    pub fn new(fetcher: F, fallback: FallbackGenerator) -> Self {
        Self {
            fetcher,
            fallback,
            metrics: Arc::new(LoadMetrics::new()),
            logger: LogManager::new("source"),
        }
    }

    pub fn metrics(&self) -> Arc<LoadMetrics> {
        self.metrics.clone()
    }

    pub fn fallback(&self) -> &FallbackGenerator {
        &self.fallback
    }

    /// Single attempt, no retry. Never fails: errors are logged and answered
    /// with the fallback batch.
    pub async fn load(&self) -> LoadOutcome {
        let fetched = self.fetcher.fetch().await.and_then(RecordBatch::validated);
        match fetched {
            Ok(batch) => {
                self.metrics.record_remote();
                self.logger
                    .record(&format!("loaded {} records from backend", batch.len()));
                LoadOutcome {
                    batch,
                    origin: BatchOrigin::Remote,
                }
            }
            Err(reason) => {
                self.metrics.record_fallback();
                let batch = self.fallback.generate();
                self.logger.warn(&format!(
                    "{}; substituting {} generated records",
                    reason,
                    batch.len()
                ));
                LoadOutcome {
                    batch,
                    origin: BatchOrigin::Fallback { reason },
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fetcher that answers every call with the same canned result.
    #[derive(Clone)]
    pub struct CannedFetcher(pub LoadResult<Vec<SarRecord>>);

    impl RecordFetcher for CannedFetcher {
        fn fetch(&self) -> impl Future<Output = LoadResult<Vec<SarRecord>>> + Send {
            let result = self.0.clone();
            async move { result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CannedFetcher;
    use super::*;
    use crate::record::batch::fixtures::mixed_records;
    use crate::source::fallback::is_fallback_id;
    use crate::source::HttpFetcher;
    use crate::telemetry::LoadSnapshot;
    use std::time::Duration;

    #[tokio::test]
    async fn remote_batch_is_used_when_valid() {
        let source = DataSource::new(
            CannedFetcher(Ok(mixed_records())),
            FallbackGenerator::default(),
        );
        let outcome = source.load().await;
        assert_eq!(outcome.origin, BatchOrigin::Remote);
        assert_eq!(outcome.batch.len(), 5);
        assert_eq!(
            source.metrics().snapshot(),
            LoadSnapshot {
                remote: 1,
                fallback: 0
            }
        );
    }

    #[tokio::test]
    async fn network_failure_falls_back() {
        let source = DataSource::new(
            CannedFetcher(Err(LoadError::Network("connection refused".into()))),
            FallbackGenerator::with_count(25),
        );
        let outcome = source.load().await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.batch.len(), 25);
        assert!(outcome.batch.iter().all(|r| is_fallback_id(&r.id)));
        assert_eq!(source.metrics().snapshot().fallback, 1);
    }

    #[tokio::test]
    async fn empty_remote_batch_falls_back() {
        let source = DataSource::new(CannedFetcher(Ok(Vec::new())), FallbackGenerator::default());
        let outcome = source.load().await;
        assert!(matches!(
            outcome.origin,
            BatchOrigin::Fallback {
                reason: LoadError::Format(_)
            }
        ));
        assert_eq!(outcome.batch.len(), 50);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let fetcher =
            HttpFetcher::new("http://127.0.0.1:9/api/sar-data", Duration::from_secs(2)).unwrap();
        let source = DataSource::new(fetcher, FallbackGenerator::with_count(10));
        let outcome = source.load().await;
        assert!(matches!(
            outcome.origin,
            BatchOrigin::Fallback {
                reason: LoadError::Network(_)
            }
        ));
        assert_eq!(outcome.batch.len(), 10);
    }
}
