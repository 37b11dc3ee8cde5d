//! JSON bodies of the visualization backend's endpoints.

use crate::record::SarRecord;
use crate::stats::IntensityBand;
use serde::{Deserialize, Serialize};

pub const SAR_DATA_PATH: &str = "/api/sar-data";
pub const JAPAN_COORDINATES_PATH: &str = "/api/japan-coordinates";
pub const GLOBE_ANIMATION_PATH: &str = "/api/globe-animation-data";

/// `GET /api/sar-data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarDataResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<usize>,
    pub data: Vec<SarRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CollectionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub collection_period: String,
    pub satellite_source: String,
    pub coverage_area: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSite {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveZone {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub activity: f64,
}

/// `GET /api/japan-coordinates`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCoordinates {
    pub country: String,
    pub coordinates: GeoPoint,
    pub regions: Vec<NamedSite>,
    pub sar_active_zones: Vec<ActiveZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointColors {
    pub high_intensity: String,
    pub medium_intensity: String,
    pub low_intensity: String,
}

impl Default for PointColors {
    fn default() -> Self {
        Self {
            high_intensity: IntensityBand::High.color().into(),
            medium_intensity: IntensityBand::Medium.color().into(),
            low_intensity: IntensityBand::Low.color().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    pub pulse_duration: u64,
    pub fade_in_duration: u64,
    pub rotation_enabled: bool,
    pub auto_rotate_speed: f64,
}

/// `GET /api/globe-animation-data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeAnimationData {
    pub rotation_speed: f64,
    pub japan_highlight_color: String,
    pub earth_texture: String,
    pub atmosphere_color: String,
    pub atmosphere_opacity: f64,
    pub point_colors: PointColors,
    pub animation_settings: AnimationSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_data_is_rejected() {
        let body = r#"{"total_points": 0, "metadata": null}"#;
        assert!(serde_json::from_str::<SarDataResponse>(body).is_err());
    }

    #[test]
    fn response_tolerates_missing_envelope_fields() {
        let body = r#"{"data": []}"#;
        let parsed: SarDataResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.metadata.is_none());
    }

    #[test]
    fn point_colors_match_intensity_bands() {
        let colors = PointColors::default();
        assert_eq!(colors.high_intensity, "#ff4444");
        assert_eq!(colors.medium_intensity, "#ffaa44");
        assert_eq!(colors.low_intensity, "#44ff44");
    }
}
