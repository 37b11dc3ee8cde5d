use crate::record::{Frequency, Polarization, RecordBatch, SarRecord, SurfaceType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const FALLBACK_ID_PREFIX: &str = "fallback_";

/// Geographic box, in degrees, that synthetic records are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    /// Box around the Japanese archipelago.
    pub const JAPAN: GeoBounds = GeoBounds {
        lat_min: 30.0,
        lat_max: 46.0,
        lng_min: 129.0,
        lng_max: 146.0,
    };

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lng_min..=self.lng_max).contains(&lng)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::JAPAN
    }
}

/// Deterministic synthetic records used when the backend is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackGenerator {
    pub count: usize,
    pub bounds: GeoBounds,
    pub seed: u64,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self {
            count: 50,
            bounds: GeoBounds::JAPAN,
            seed: 0,
        }
    }
}

impl FallbackGenerator {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Always yields at least one record.
    pub fn generate(&self) -> RecordBatch {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let bounds = self.bounds;
        let records = (0..self.count.max(1))
            .map(|idx| SarRecord {
                id: format!("{}{}", FALLBACK_ID_PREFIX, idx),
                lat: rng.gen_range(bounds.lat_min..=bounds.lat_max),
                lng: rng.gen_range(bounds.lng_min..=bounds.lng_max),
                intensity: rng.gen_range(0.0..=1.0),
                frequency: Frequency::ALL[rng.gen_range(0..Frequency::ALL.len())],
                polarization: Polarization::ALL[rng.gen_range(0..Polarization::ALL.len())],
                surface_type: Some(SurfaceType::ALL[rng.gen_range(0..SurfaceType::ALL.len())]),
                timestamp: None,
            })
            .collect();
        RecordBatch::new(records)
    }
}

pub fn is_fallback_id(id: &str) -> bool {
    id.starts_with(FALLBACK_ID_PREFIX)
}
