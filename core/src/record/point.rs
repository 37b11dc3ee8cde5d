use crate::record::SarRecord;
use crate::stats::IntensityBand;
use serde::{Deserialize, Serialize};

/// Synthetic point of interest that is always drawn but never counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightMarker {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
}

impl HighlightMarker {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            intensity: 1.0,
        }
    }

    pub fn japan_center() -> Self {
        Self::new("Japan Center", 36.2048, 138.2529)
    }
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self::japan_center()
    }
}

/// Entry of the globe's point layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobePoint {
    Observation(SarRecord),
    Highlight(HighlightMarker),
}

impl GlobePoint {
    pub fn lat(&self) -> f64 {
        match self {
            GlobePoint::Observation(record) => record.lat,
            GlobePoint::Highlight(marker) => marker.lat,
        }
    }

    pub fn lng(&self) -> f64 {
        match self {
            GlobePoint::Observation(record) => record.lng,
            GlobePoint::Highlight(marker) => marker.lng,
        }
    }

    pub fn intensity(&self) -> f64 {
        match self {
            GlobePoint::Observation(record) => record.intensity,
            GlobePoint::Highlight(marker) => marker.intensity,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, GlobePoint::Highlight(_))
    }

    pub fn observation(&self) -> Option<&SarRecord> {
        match self {
            GlobePoint::Observation(record) => Some(record),
            GlobePoint::Highlight(_) => None,
        }
    }

    pub fn band(&self) -> IntensityBand {
        IntensityBand::classify(self.intensity())
    }

    /// Hex color used by the point layer.
    pub fn color(&self) -> &'static str {
        self.band().color()
    }
}
