use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Radar band the observation was acquired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "L-band")]
    LBand,
    #[serde(rename = "C-band")]
    CBand,
    #[serde(rename = "X-band")]
    XBand,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::LBand, Frequency::CBand, Frequency::XBand];

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::LBand => "L-band",
            Frequency::CBand => "C-band",
            Frequency::XBand => "X-band",
        }
    }
}

/// Transmit/receive polarization pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Polarization {
    #[serde(rename = "HH")]
    Hh,
    #[serde(rename = "HV")]
    Hv,
    #[serde(rename = "VV")]
    Vv,
    #[serde(rename = "VH")]
    Vh,
}

impl Polarization {
    pub const ALL: [Polarization; 4] = [
        Polarization::Hh,
        Polarization::Hv,
        Polarization::Vv,
        Polarization::Vh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Polarization::Hh => "HH",
            Polarization::Hv => "HV",
            Polarization::Vv => "VV",
            Polarization::Vh => "VH",
        }
    }
}

/// Ground cover classification attached to some observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Urban,
    Forest,
    Water,
    Agriculture,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 4] = [
        SurfaceType::Urban,
        SurfaceType::Forest,
        SurfaceType::Water,
        SurfaceType::Agriculture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceType::Urban => "urban",
            SurfaceType::Forest => "forest",
            SurfaceType::Water => "water",
            SurfaceType::Agriculture => "agriculture",
        }
    }
}

macro_rules! string_enum {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
                    .ok_or_else(|| format!("unknown {} '{}'", $what, value))
            }
        }
    };
}

string_enum!(Frequency, "frequency");
string_enum!(Polarization, "polarization");
string_enum!(SurfaceType, "surface type");

/// A single SAR observation. Immutable once its batch is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    pub frequency: Frequency,
    pub polarization: Polarization,
    #[serde(
        default,
        deserialize_with = "lenient_surface_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface_type: Option<SurfaceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

// Unknown surface classes (e.g. "mountain") are dropped rather than failing the batch.
fn lenient_surface_type<'de, D>(deserializer: D) -> Result<Option<SurfaceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_wire_names() {
        let json = r#"{
            "id": "sar_0_1",
            "lat": 35.7,
            "lng": 139.6,
            "intensity": 0.42,
            "frequency": "C-band",
            "polarization": "VH",
            "surface_type": "forest",
            "timestamp": "2024-09-14T10:00:00"
        }"#;
        let record: SarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.frequency, Frequency::CBand);
        assert_eq!(record.polarization, Polarization::Vh);
        assert_eq!(record.surface_type, Some(SurfaceType::Forest));
        assert_eq!(record.timestamp.as_deref(), Some("2024-09-14T10:00:00"));
    }

    #[test]
    fn unknown_surface_type_is_dropped() {
        let json = r#"{"id":"a","lat":1.0,"lng":2.0,"intensity":0.5,
            "frequency":"L-band","polarization":"HH","surface_type":"mountain"}"#;
        let record: SarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.surface_type, None);
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let json = r#"{"id":"a","lat":1.0,"lng":2.0,"intensity":0.5,
            "frequency":"P-band","polarization":"HH"}"#;
        assert!(serde_json::from_str::<SarRecord>(json).is_err());
    }

    #[test]
    fn facet_values_parse_case_insensitively() {
        assert_eq!("x-BAND".parse::<Frequency>().unwrap(), Frequency::XBand);
        assert_eq!("vv".parse::<Polarization>().unwrap(), Polarization::Vv);
        assert!("ku-band".parse::<Frequency>().is_err());
        assert_eq!(Frequency::LBand.to_string(), "L-band");
    }
}
