use crate::math::Vec3;
use crate::prelude::SurfaceError;
use crate::presenter::GlobeOptions;
use crate::record::GlobePoint;

/// Rendering substrate driven by the globe presenter.
///
/// Implementations own the actual scene, globe mesh and point-cloud layer;
/// the presenter only tells them what to show and when to draw.
pub trait RenderSurface {
    /// Creates the scene, globe mesh and lights. Called once, before any other call.
    fn create_scene(&mut self, options: &GlobeOptions) -> Result<(), SurfaceError>;
    fn set_point_data(&mut self, points: &[GlobePoint]);
    fn set_camera_position(&mut self, position: Vec3);
    fn set_globe_rotation(&mut self, radians: f64);
    fn set_viewport(&mut self, width: u32, height: u32);
    fn render(&mut self) -> Result<(), SurfaceError>;
    /// Releases everything acquired by `create_scene`.
    fn release(&mut self);

    /// Whether drag-to-orbit camera controls are available on this surface.
    fn supports_orbit_controls(&self) -> bool {
        false
    }
}
