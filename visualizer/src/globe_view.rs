use crate::surface::GlobeFrame;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Theme,
};
use sarcore::math::{coord_to_position, spin_about_poles, ViewProjection};
use sarcore::record::GlobePoint;

const MIN_MARKER_RADIUS: f32 = 2.0;

/// One point placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPoint {
    pub position: Point,
    pub radius: f32,
    pub color: Color,
    pub depth: f64,
}

/// Screen-space layout of a [`GlobeFrame`] for a canvas of a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeLayout {
    pub center: Point,
    pub globe_radius: f32,
    pub atmosphere_radius: f32,
    /// Front-facing points, farthest first.
    pub points: Vec<ScreenPoint>,
}

fn rgb_color(hex: u32) -> Color {
    Color::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(rgb_color)
}

fn point_color(point: &GlobePoint, highlight: u32) -> Color {
    match point {
        GlobePoint::Highlight(_) => rgb_color(highlight),
        GlobePoint::Observation(_) => {
            let [r, g, b] = point.band().rgb();
            Color::from_rgb8(r, g, b)
        }
    }
}

/// Projects the frame onto a `width` x `height` canvas, or `None` when the
/// camera sits at the globe center.
pub fn layout(frame: &GlobeFrame, width: f32, height: f32) -> Option<GlobeLayout> {
    let view = ViewProjection::looking_from(frame.camera)?;
    let options = &frame.options;
    let half_fov = (options.camera.fov_deg / 2.0).to_radians();
    let visible_half_height = frame.camera.norm() * half_fov.tan();
    if visible_half_height <= 0.0 {
        return None;
    }
    let scale = (f64::from(height) / 2.0) / visible_half_height;
    let center = Point::new(width / 2.0, height / 2.0);
    let surface_distance = options.globe_radius * (1.0 + options.point_altitude);

    let mut points: Vec<ScreenPoint> = frame
        .points
        .iter()
        .filter_map(|point| {
            let world = spin_about_poles(
                coord_to_position(point.lat(), point.lng(), surface_distance),
                frame.rotation,
            );
            let projected = view.project(world);
            if !projected.facing {
                return None;
            }
            let size = if point.is_highlight() { 2.5 } else { 1.0 };
            Some(ScreenPoint {
                position: Point::new(
                    center.x + (projected.x * scale) as f32,
                    center.y - (projected.y * scale) as f32,
                ),
                radius: ((options.point_radius * size * scale) as f32).max(MIN_MARKER_RADIUS),
                color: point_color(point, options.highlight_color),
                depth: projected.depth,
            })
        })
        .collect();
    points.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    Some(GlobeLayout {
        center,
        globe_radius: (options.globe_radius * scale) as f32,
        atmosphere_radius: (options.globe_radius * (1.0 + options.atmosphere_altitude) * scale)
            as f32,
        points,
    })
}

/// Canvas program drawing the last committed globe frame.
#[derive(Debug, Clone)]
pub struct GlobeCanvas {
    pub frame: Option<GlobeFrame>,
}

impl<Message> canvas::Program<Message> for GlobeCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let Some(globe) = self.frame.as_ref() else {
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::BLACK);
            return vec![frame.into_geometry()];
        };
        let options = &globe.options;
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            rgb_color(options.background_color),
        );

        if let Some(layout) = layout(globe, bounds.width, bounds.height) {
            let atmosphere = parse_hex_color(&options.atmosphere_color).unwrap_or(Color::WHITE);
            let halo = Path::new(|builder| builder.circle(layout.center, layout.atmosphere_radius));
            frame.stroke(
                &halo,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color { a: 0.35, ..atmosphere }),
            );

            let globe_disc = Path::new(|builder| builder.circle(layout.center, layout.globe_radius));
            frame.fill(&globe_disc, Color::from_rgb(0.05, 0.12, 0.25));
            frame.stroke(
                &globe_disc,
                Stroke::default().with_color(Color::from_rgb(0.2, 0.35, 0.55)),
            );

            for point in &layout.points {
                let marker = Path::new(|builder| builder.circle(point.position, point.radius));
                frame.fill(&marker, point.color);
            }
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarcore::presenter::GlobeOptions;
    use sarcore::record::{Frequency, HighlightMarker, Polarization, SarRecord};

    fn observation(lat: f64, lng: f64, intensity: f64) -> GlobePoint {
        GlobePoint::Observation(SarRecord {
            id: format!("p_{}_{}", lat, lng),
            lat,
            lng,
            intensity,
            frequency: Frequency::LBand,
            polarization: Polarization::Hh,
            surface_type: None,
            timestamp: None,
        })
    }

    fn frame_facing(lat: f64, lng: f64, points: Vec<GlobePoint>) -> GlobeFrame {
        GlobeFrame {
            options: GlobeOptions::default(),
            points,
            camera: coord_to_position(lat, lng, 250.0),
            rotation: 0.0,
            viewport: (800, 600),
        }
    }

    #[test]
    fn point_under_camera_lands_at_center() {
        let frame = frame_facing(0.0, 0.0, vec![observation(0.0, 0.0, 0.9)]);
        let layout = layout(&frame, 800.0, 600.0).unwrap();
        assert_eq!(layout.points.len(), 1);
        let point = &layout.points[0];
        assert!((point.position.x - 400.0).abs() < 1e-3);
        assert!((point.position.y - 300.0).abs() < 1e-3);
        assert_eq!(point.color, Color::from_rgb8(0xff, 0x44, 0x44));
    }

    #[test]
    fn far_side_points_are_culled() {
        let frame = frame_facing(
            0.0,
            0.0,
            vec![observation(0.0, 0.0, 0.4), observation(0.0, 180.0, 0.4)],
        );
        let layout = layout(&frame, 800.0, 600.0).unwrap();
        assert_eq!(layout.points.len(), 1);
    }

    #[test]
    fn closer_camera_enlarges_globe() {
        let far = layout(&frame_facing(0.0, 0.0, Vec::new()), 800.0, 600.0).unwrap();
        let mut near_frame = frame_facing(0.0, 0.0, Vec::new());
        near_frame.camera = coord_to_position(0.0, 0.0, 180.0);
        let near = layout(&near_frame, 800.0, 600.0).unwrap();
        assert!(near.globe_radius > far.globe_radius);
        assert!(near.atmosphere_radius > near.globe_radius);
    }

    #[test]
    fn highlight_uses_configured_color() {
        let marker = GlobePoint::Highlight(HighlightMarker::japan_center());
        let frame = frame_facing(36.2048, 138.2529, vec![marker]);
        let layout = layout(&frame, 800.0, 600.0).unwrap();
        assert_eq!(layout.points[0].color, Color::from_rgb8(0xff, 0, 0));
    }

    #[test]
    fn camera_at_origin_has_no_layout() {
        let mut frame = frame_facing(0.0, 0.0, Vec::new());
        frame.camera = sarcore::math::Vec3::zeros();
        assert!(layout(&frame, 800.0, 600.0).is_none());
    }

    #[test]
    fn hex_colors_parse_with_or_without_hash() {
        assert_eq!(parse_hex_color("#ffffff"), Some(Color::WHITE));
        assert_eq!(parse_hex_color("000000"), Some(Color::BLACK));
        assert_eq!(parse_hex_color("#fff"), None);
    }
}
