use sarcore::api::{
    ActiveZone, AnimationSettings, GeoPoint, GlobeAnimationData, NamedSite, PointColors,
    RegionCoordinates,
};
use sarcore::presenter::GlobeOptions;

fn site(name: &str, lat: f64, lng: f64) -> NamedSite {
    NamedSite {
        name: name.into(),
        lat,
        lng,
    }
}

fn zone(name: &str, lat: f64, lng: f64, activity: f64) -> ActiveZone {
    ActiveZone {
        name: name.into(),
        lat,
        lng,
        activity,
    }
}

/// Body of `/api/japan-coordinates`.
pub fn japan_coordinates() -> RegionCoordinates {
    let center = GlobeOptions::default().highlight;
    RegionCoordinates {
        country: "Japan".into(),
        coordinates: GeoPoint {
            lat: center.lat,
            lng: center.lng,
        },
        regions: vec![
            site("Hokkaido", 43.2203, 142.8635),
            site("Honshu", 36.2048, 138.2529),
            site("Kyushu", 31.7917, 130.7633),
            site("Shikoku", 33.7838, 133.6585),
        ],
        sar_active_zones: vec![
            zone("Tokyo Bay", 35.5494, 139.7798, 0.95),
            zone("Osaka Bay", 34.6197, 135.4305, 0.87),
            zone("Sendai Plains", 38.2682, 140.8694, 0.72),
        ],
    }
}

/// Body of `/api/globe-animation-data`, derived from the default globe options.
pub fn globe_animation_data() -> GlobeAnimationData {
    let options = GlobeOptions::default();
    GlobeAnimationData {
        rotation_speed: options.rotation_speed,
        japan_highlight_color: format!("#{:06x}", options.highlight_color),
        earth_texture: "/static/images/earth-texture.jpg".into(),
        atmosphere_color: options.atmosphere_color,
        atmosphere_opacity: options.atmosphere_altitude,
        point_colors: PointColors::default(),
        animation_settings: AnimationSettings {
            pulse_duration: 2000,
            fade_in_duration: 1500,
            rotation_enabled: options.auto_rotate,
            auto_rotate_speed: 0.5,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_center_on_highlight_marker() {
        let coords = japan_coordinates();
        assert_eq!(coords.coordinates.lat, 36.2048);
        assert_eq!(coords.regions.len(), 4);
        assert_eq!(coords.sar_active_zones[0].name, "Tokyo Bay");
    }

    #[test]
    fn animation_data_mirrors_globe_defaults() {
        let data = globe_animation_data();
        assert_eq!(data.japan_highlight_color, "#ff0000");
        assert_eq!(data.rotation_speed, 0.002);
        assert_eq!(data.point_colors.high_intensity, "#ff4444");
        assert!(data.animation_settings.rotation_enabled);
    }
}
