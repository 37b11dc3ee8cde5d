use anyhow::Context;
use sarcore::presenter::GlobeOptions;
use sarcore::source::FallbackGenerator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Everything the dashboard needs at boot; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub fallback: FallbackGenerator,
    pub globe: GlobeOptions,
    /// Delay between the first batch arriving and the camera flying to the highlight.
    pub focus_delay_ms: u64,
    pub focus_distance: f64,
    pub frame_interval_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/api/sar-data".into(),
            timeout_ms: 10_000,
            fallback: FallbackGenerator::default(),
            globe: GlobeOptions::default(),
            focus_delay_ms: 3000,
            focus_distance: 180.0,
            frame_interval_ms: 16,
        }
    }
}

impl VisualizerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading visualizer config {}", path_ref.display()))?;
        let config: VisualizerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing visualizer config {}", path_ref.display()))?;
        anyhow::ensure!(config.frame_interval_ms > 0, "frame_interval_ms must be positive");
        anyhow::ensure!(config.focus_distance > 0.0, "focus_distance must be positive");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
