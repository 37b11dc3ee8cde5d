use crate::math::Vec3;
use nalgebra::{Rotation3, Vector3};

/// Geographic coordinate to scene position at `distance` from the globe center.
///
/// Polar angle comes from latitude, azimuth from longitude shifted by a half
/// turn, so the north pole is +Y and (0°, 0°) lands on +X.
pub fn coord_to_position(lat: f64, lng: f64, distance: f64) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();

    Vec3::new(
        -distance * phi.sin() * theta.cos(),
        distance * phi.cos(),
        distance * phi.sin() * theta.sin(),
    )
}

/// Spins a scene position about the globe's polar (Y) axis.
pub fn spin_about_poles(point: Vec3, radians: f64) -> Vec3 {
    Rotation3::from_axis_angle(&Vector3::y_axis(), radians) * point
}

/// Point projected onto the camera's view plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Scene units to the right of the view center.
    pub x: f64,
    /// Scene units above the view center.
    pub y: f64,
    /// Distance along the view direction from the camera.
    pub depth: f64,
    /// False when the point sits on the far side of the globe.
    pub facing: bool,
}

/// Orthographic view from a camera that always looks at the globe center.
#[derive(Debug, Clone, Copy)]
pub struct ViewProjection {
    eye: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl ViewProjection {
    pub fn looking_from(eye: Vec3) -> Option<Self> {
        let forward = (-eye).try_normalize(f64::EPSILON)?;
        let right = forward
            .cross(&Vec3::y())
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);
        Some(Self {
            eye,
            forward,
            right,
            up,
        })
    }

    pub fn project(&self, point: Vec3) -> ProjectedPoint {
        ProjectedPoint {
            x: point.dot(&self.right),
            y: point.dot(&self.up),
            depth: (point - self.eye).dot(&self.forward),
            // A surface point is visible when the camera lies above its tangent plane.
            facing: point.dot(&self.eye) >= point.norm_squared(),
        }
    }
}
