use crate::api::SarDataResponse;
use crate::prelude::{LoadError, LoadResult};
use crate::record::SarRecord;
use crate::source::loader::RecordFetcher;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches `{ "data": [...] }` from the SAR data endpoint with a single GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LoadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecordFetcher for HttpFetcher {
    fn fetch(&self) -> impl Future<Output = LoadResult<Vec<SarRecord>>> + Send {
        let request = self.client.get(&self.endpoint);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| LoadError::Network(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Network(format!("unexpected status {}", status)));
            }
            let body = response
                .bytes()
                .await
                .map_err(|e| LoadError::Network(e.to_string()))?;
            let parsed: SarDataResponse =
                serde_json::from_slice(&body).map_err(|e| LoadError::Format(e.to_string()))?;
            Ok(parsed.data)
        }
    }
}
