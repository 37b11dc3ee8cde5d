use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

/// Oldest acquisition the sample generator may backdate to (about a century).
pub const MAX_AGE_DAYS: i64 = 36_500;

/// Shape of the generated `/api/sar-data` body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub points_per_site: usize,
    /// Maximum offset, in degrees, applied to each site's coordinates.
    pub jitter_deg: f64,
    pub intensity_min: f64,
    pub intensity_max: f64,
    pub max_age_days: i64,
    /// Fixed seed makes every response identical; unset draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            points_per_site: 5,
            jitter_deg: 0.5,
            intensity_min: 0.3,
            intensity_max: 1.0,
            max_age_days: 30,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub samples: SampleConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            samples: SampleConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading server config {}", path_ref.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing server config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let samples = &self.samples;
        anyhow::ensure!(
            0.0 <= samples.intensity_min
                && samples.intensity_min <= samples.intensity_max
                && samples.intensity_max <= 1.0,
            "intensity range [{}, {}] must lie within [0, 1]",
            samples.intensity_min,
            samples.intensity_max
        );
        anyhow::ensure!(samples.jitter_deg >= 0.0, "jitter must not be negative");
        anyhow::ensure!(
            (0..=MAX_AGE_DAYS).contains(&samples.max_age_days),
            "max_age_days {} must lie within [0, {}]",
            samples.max_age_days,
            MAX_AGE_DAYS
        );
        Ok(())
    }

    pub fn apply_overrides(
        &mut self,
        host: Option<IpAddr>,
        port: Option<u16>,
        points_per_site: Option<usize>,
        seed: Option<u64>,
    ) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(points) = points_per_site {
            self.samples.points_per_site = points;
        }
        if seed.is_some() {
            self.samples.seed = seed;
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
