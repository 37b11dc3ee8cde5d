pub mod fallback;
pub mod http;
pub mod loader;

pub use fallback::{FallbackGenerator, GeoBounds};
pub use http::HttpFetcher;
pub use loader::{BatchOrigin, DataSource, LoadOutcome, RecordFetcher};
