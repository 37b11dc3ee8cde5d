use crate::math::{ease_power2_in_out, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::Duration;

const POLAR_MARGIN: f64 = 1e-3;
const VELOCITY_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub start_distance: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            near: 1.0,
            far: 1000.0,
            start_distance: 250.0,
        }
    }
}

/// Perspective camera that always looks at the globe center.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(options: &CameraOptions, aspect: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, options.start_distance),
            fov_deg: options.fov_deg,
            aspect,
            near: options.near,
            far: options.far,
        }
    }

    pub fn distance(&self) -> f64 {
        self.position.norm()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }
}

/// Eased camera move between two positions over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTween {
    from: Vec3,
    to: Vec3,
    duration: Duration,
    elapsed: Duration,
}

impl CameraTween {
    pub fn new(from: Vec3, to: Vec3, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the tween and returns the camera position for this frame.
    pub fn advance(&mut self, dt: Duration) -> Vec3 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.from.lerp(&self.to, ease_power2_in_out(progress))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitOptions {
    pub enable_damping: bool,
    pub damping_factor: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 150.0,
            max_distance: 400.0,
        }
    }
}

/// Drag-to-orbit camera controls with damping and a distance clamp.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    options: OrbitOptions,
    azimuth_velocity: f64,
    polar_velocity: f64,
}

impl OrbitControls {
    pub fn new(options: OrbitOptions) -> Self {
        Self {
            options,
            azimuth_velocity: 0.0,
            polar_velocity: 0.0,
        }
    }

    /// Queues an angular drag, in radians, consumed by subsequent updates.
    pub fn nudge(&mut self, d_azimuth: f64, d_polar: f64) {
        self.azimuth_velocity += d_azimuth;
        self.polar_velocity += d_polar;
    }

    pub fn is_settled(&self) -> bool {
        self.azimuth_velocity == 0.0 && self.polar_velocity == 0.0
    }

    /// Applies pending motion and the distance clamp. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let radius = camera.distance();
        if radius <= f64::EPSILON {
            return false;
        }
        let clamped = radius.clamp(self.options.min_distance, self.options.max_distance);
        if self.is_settled() && clamped == radius {
            return false;
        }

        let position = camera.position;
        let theta = position.x.atan2(position.z) + self.azimuth_velocity;
        let phi = ((position.y / radius).clamp(-1.0, 1.0).acos() + self.polar_velocity)
            .clamp(POLAR_MARGIN, PI - POLAR_MARGIN);

        camera.position = Vec3::new(
            clamped * phi.sin() * theta.sin(),
            clamped * phi.cos(),
            clamped * phi.sin() * theta.cos(),
        );

        if self.options.enable_damping {
            let keep = 1.0 - self.options.damping_factor;
            self.azimuth_velocity *= keep;
            self.polar_velocity *= keep;
        } else {
            self.azimuth_velocity = 0.0;
            self.polar_velocity = 0.0;
        }
        if self.azimuth_velocity.abs() < VELOCITY_FLOOR {
            self.azimuth_velocity = 0.0;
        }
        if self.polar_velocity.abs() < VELOCITY_FLOOR {
            self.polar_velocity = 0.0;
        }
        true
    }
}
