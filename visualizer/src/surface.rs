use sarcore::math::Vec3;
use sarcore::presenter::{GlobeOptions, RenderSurface};
use sarcore::record::GlobePoint;
use sarcore::SurfaceError;

/// Scene state as of the last rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeFrame {
    pub options: GlobeOptions,
    pub points: Vec<GlobePoint>,
    pub camera: Vec3,
    pub rotation: f64,
    pub viewport: (u32, u32),
}

/// [`RenderSurface`] backed by the dashboard's canvas widget.
///
/// The presenter stages scene changes here; `render` commits them into a
/// [`GlobeFrame`] that the canvas draws on its next redraw.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    scene: Option<GlobeFrame>,
    committed: Option<GlobeFrame>,
    renders: u64,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<&GlobeFrame> {
        self.committed.as_ref()
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    fn staged(&mut self) -> Option<&mut GlobeFrame> {
        self.scene.as_mut()
    }
}

impl RenderSurface for CanvasSurface {
    fn create_scene(&mut self, options: &GlobeOptions) -> Result<(), SurfaceError> {
        if options.width == 0 || options.height == 0 {
            return Err(SurfaceError::Unavailable(format!(
                "zero-sized viewport {}x{}",
                options.width, options.height
            )));
        }
        self.scene = Some(GlobeFrame {
            options: options.clone(),
            points: Vec::new(),
            camera: Vec3::zeros(),
            rotation: 0.0,
            viewport: (options.width, options.height),
        });
        Ok(())
    }

    fn set_point_data(&mut self, points: &[GlobePoint]) {
        if let Some(scene) = self.staged() {
            scene.points = points.to_vec();
        }
    }

    fn set_camera_position(&mut self, position: Vec3) {
        if let Some(scene) = self.staged() {
            scene.camera = position;
        }
    }

    fn set_globe_rotation(&mut self, radians: f64) {
        if let Some(scene) = self.staged() {
            scene.rotation = radians;
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        if let Some(scene) = self.staged() {
            scene.viewport = (width, height);
        }
    }

    fn render(&mut self) -> Result<(), SurfaceError> {
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| SurfaceError::Render("scene not created".into()))?;
        self.committed = Some(scene.clone());
        self.renders += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.scene = None;
        self.committed = None;
    }

    fn supports_orbit_controls(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarcore::record::HighlightMarker;

    #[test]
    fn render_commits_staged_scene() {
        let mut surface = CanvasSurface::new();
        surface.create_scene(&GlobeOptions::default()).unwrap();
        surface.set_point_data(&[GlobePoint::Highlight(HighlightMarker::japan_center())]);
        surface.set_globe_rotation(0.5);
        assert!(surface.frame().is_none());

        surface.render().unwrap();
        let frame = surface.frame().unwrap();
        assert_eq!(frame.points.len(), 1);
        assert_eq!(frame.rotation, 0.5);
        assert_eq!(surface.renders(), 1);
    }

    #[test]
    fn render_without_scene_fails() {
        let mut surface = CanvasSurface::new();
        assert!(matches!(surface.render(), Err(SurfaceError::Render(_))));
    }

    #[test]
    fn zero_sized_viewport_is_unavailable() {
        let mut surface = CanvasSurface::new();
        let options = GlobeOptions {
            width: 0,
            ..GlobeOptions::default()
        };
        assert!(matches!(
            surface.create_scene(&options),
            Err(SurfaceError::Unavailable(_))
        ));
    }

    #[test]
    fn release_drops_committed_frame() {
        let mut surface = CanvasSurface::new();
        surface.create_scene(&GlobeOptions::default()).unwrap();
        surface.render().unwrap();
        surface.release();
        assert!(surface.frame().is_none());
        assert!(surface.render().is_err());
    }
}
