use crate::config::SampleConfig;
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sarcore::api::{CollectionMetadata, SarDataResponse};
use sarcore::record::{Frequency, Polarization, SarRecord, SurfaceType};

/// Observation sites the sample points cluster around.
pub const BASE_SITES: [(&str, f64, f64); 5] = [
    ("Tokyo", 35.6762, 139.6503),
    ("Osaka", 34.6937, 135.5023),
    ("Kyoto", 35.0116, 135.7681),
    ("Central Japan", 36.2048, 138.2529),
    ("Sapporo", 43.0642, 141.3469),
];

fn rng_for(config: &SampleConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn sample_record(
    rng: &mut StdRng,
    config: &SampleConfig,
    site: usize,
    index: usize,
    now: DateTime<Utc>,
) -> anyhow::Result<SarRecord> {
    let (_, lat, lng) = BASE_SITES[site];
    let jitter = config.jitter_deg;
    let age_days = rng.gen_range(0..=config.max_age_days);
    let acquired = Duration::try_days(age_days)
        .and_then(|age| now.checked_sub_signed(age))
        .context("acquisition time out of range")?;

    Ok(SarRecord {
        id: format!("sar_{}_{}", site, index),
        lat: (lat + rng.gen_range(-jitter..=jitter)).clamp(-90.0, 90.0),
        lng: (lng + rng.gen_range(-jitter..=jitter)).clamp(-180.0, 180.0),
        intensity: rng.gen_range(config.intensity_min..=config.intensity_max),
        frequency: Frequency::ALL[rng.gen_range(0..Frequency::ALL.len())],
        polarization: Polarization::ALL[rng.gen_range(0..Polarization::ALL.len())],
        surface_type: Some(SurfaceType::ALL[rng.gen_range(0..SurfaceType::ALL.len())]),
        timestamp: Some(acquired.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
    })
}

/// Builds one `/api/sar-data` body: `points_per_site` jittered points per base site.
pub fn build_sar_response(
    config: &SampleConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<SarDataResponse> {
    let mut rng = rng_for(config);
    let mut data = Vec::with_capacity(BASE_SITES.len() * config.points_per_site);
    for site in 0..BASE_SITES.len() {
        for index in 0..config.points_per_site {
            data.push(sample_record(&mut rng, config, site, index, now)?);
        }
    }

    let start = Duration::try_days(config.max_age_days)
        .and_then(|period| now.checked_sub_signed(period))
        .context("collection period out of range")?;
    let metadata = CollectionMetadata {
        collection_period: format!(
            "{} to {}",
            start.format("%Y-%m-%d"),
            now.format("%Y-%m-%d")
        ),
        satellite_source: "Synthetic Aperture Radar Network".into(),
        coverage_area: "Japan Archipelago".into(),
    };

    Ok(SarDataResponse {
        total_points: Some(data.len()),
        data,
        metadata: Some(metadata),
    })
}
