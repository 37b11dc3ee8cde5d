use crate::math::{coord_to_position, Vec3};
use crate::prelude::VisibleSetObserver;
use crate::presenter::camera::{Camera, CameraOptions, CameraTween, OrbitControls, OrbitOptions};
use crate::presenter::render_loop::{LoopState, RenderLoop};
use crate::presenter::surface::RenderSurface;
use crate::record::{GlobePoint, HighlightMarker, VisibleSet};
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presentation settings for one globe instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeOptions {
    pub width: u32,
    pub height: u32,
    pub background_color: u32,
    pub highlight_color: u32,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub globe_radius: f64,
    pub point_altitude: f64,
    pub point_radius: f64,
    pub auto_rotate: bool,
    /// Radians added to the globe's spin on every frame.
    pub rotation_speed: f64,
    pub focus_duration_ms: u64,
    pub reveal_interval_ms: u64,
    pub camera: CameraOptions,
    pub controls: OrbitOptions,
    pub highlight: HighlightMarker,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: 0x000000,
            highlight_color: 0xff0000,
            atmosphere_color: "#ffffff".into(),
            atmosphere_altitude: 0.1,
            globe_radius: 100.0,
            point_altitude: 0.01,
            point_radius: 0.8,
            auto_rotate: true,
            rotation_speed: 0.002,
            focus_duration_ms: 2000,
            reveal_interval_ms: 100,
            camera: CameraOptions::default(),
            controls: OrbitOptions::default(),
            highlight: HighlightMarker::japan_center(),
        }
    }
}

impl GlobeOptions {
    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_duration_ms)
    }

    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

#[derive(Debug, Clone)]
struct ScheduledFocus {
    remaining: Duration,
    lat: f64,
    lng: f64,
    distance: f64,
}

/// Sequential appearance of the layer's points, one per interval.
#[derive(Debug, Clone)]
struct Reveal {
    interval: Duration,
    elapsed: Duration,
}

impl Reveal {
    fn advance(&mut self, dt: Duration, total: usize) -> usize {
        let count = if self.interval.is_zero() {
            total
        } else {
            (self.elapsed.as_secs_f64() / self.interval.as_secs_f64()).floor() as usize + 1
        };
        self.elapsed += dt;
        count.min(total)
    }
}

/// Owns the scene on a [`RenderSurface`], the camera and the render loop, and
/// keeps the surface's point layer bound to the latest visible subset plus the
/// highlight marker.
pub struct GlobePresenter<S: RenderSurface> {
    surface: S,
    options: GlobeOptions,
    camera: Camera,
    controls: Option<OrbitControls>,
    render_loop: RenderLoop,
    acquired: bool,
    disposed: bool,
    layer: Vec<GlobePoint>,
    pending: Option<Vec<GlobePoint>>,
    shown: usize,
    rotation: f64,
    auto_rotate: bool,
    rotation_speed: f64,
    tween: Option<CameraTween>,
    scheduled_focus: Option<ScheduledFocus>,
    reveal: Option<Reveal>,
    logger: LogManager,
}

impl<S: RenderSurface> GlobePresenter<S> {
    pub fn new(surface: S, options: GlobeOptions) -> Self {
        let camera = Camera::new(&options.camera, options.aspect());
        let layer = vec![GlobePoint::Highlight(options.highlight.clone())];
        Self {
            surface,
            camera,
            controls: None,
            render_loop: RenderLoop::new(),
            acquired: false,
            disposed: false,
            shown: layer.len(),
            layer,
            pending: None,
            rotation: 0.0,
            auto_rotate: options.auto_rotate,
            rotation_speed: options.rotation_speed,
            tween: None,
            scheduled_focus: None,
            reveal: None,
            logger: LogManager::new("globe"),
            options,
        }
    }

    /// Creates the scene and starts the render loop.
    ///
    /// A surface that cannot create its scene leaves the presenter inert (it
    /// still accepts data and can be disposed) instead of failing.
    pub fn start(&mut self) -> bool {
        if self.disposed || self.render_loop.state() != LoopState::Idle {
            return false;
        }

        if let Err(err) = self.surface.create_scene(&self.options) {
            self.logger
                .warn(&format!("scene creation failed, globe disabled: {}", err));
            return false;
        }
        self.acquired = true;

        self.controls = if self.surface.supports_orbit_controls() {
            Some(OrbitControls::new(self.options.controls.clone()))
        } else {
            self.logger
                .warn("orbit controls unavailable, camera drag disabled");
            None
        };

        self.surface
            .set_viewport(self.options.width, self.options.height);
        self.surface.set_camera_position(self.camera.position);
        self.surface.set_point_data(&self.layer);
        self.render_loop.start();
        self.logger.record("render loop started");
        true
    }

    /// Runs one frame. Returns false when the loop is not running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.render_loop.begin_frame().is_none() {
            return false;
        }

        if let Some(scheduled) = self.scheduled_focus.as_mut() {
            scheduled.remaining = scheduled.remaining.saturating_sub(dt);
            if scheduled.remaining.is_zero() {
                let ScheduledFocus {
                    lat, lng, distance, ..
                } = scheduled.clone();
                self.scheduled_focus = None;
                self.focus(lat, lng, distance);
            }
        }

        if let Some(points) = self.pending.take() {
            self.layer = points;
            self.shown = self.layer.len();
            self.surface.set_point_data(&self.layer);
        }

        if let Some(reveal) = self.reveal.as_mut() {
            let total = self.layer.len();
            let count = reveal.advance(dt, total);
            if count != self.shown {
                self.shown = count;
                self.surface.set_point_data(&self.layer[..count]);
            }
            if count >= total {
                self.reveal = None;
            }
        }

        if self.auto_rotate {
            self.rotation += self.rotation_speed;
            self.surface.set_globe_rotation(self.rotation);
        }

        if let Some(tween) = self.tween.as_mut() {
            self.camera.position = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }

        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut self.camera);
        }

        self.surface.set_camera_position(self.camera.position);
        if let Err(err) = self.surface.render() {
            self.logger.warn(&format!("frame dropped: {}", err));
        }
        true
    }

    /// Runs `frames` consecutive frames of `dt` each; returns how many rendered.
    pub fn run_for(&mut self, frames: usize, dt: Duration) -> usize {
        (0..frames).filter(|_| self.tick(dt)).count()
    }

    /// Replaces the point layer with `visible` plus the highlight marker.
    /// Takes effect on the next frame; the latest call wins.
    pub fn set_records(&mut self, visible: &VisibleSet) {
        let mut points: Vec<GlobePoint> = visible
            .iter()
            .cloned()
            .map(GlobePoint::Observation)
            .collect();
        points.push(GlobePoint::Highlight(self.options.highlight.clone()));
        self.pending = Some(points);
        self.reveal = None;
    }

    /// Starts a camera move toward `(lat, lng)` at `distance` from the globe
    /// center and returns the target position.
    pub fn focus(&mut self, lat: f64, lng: f64, distance: f64) -> Vec3 {
        let target = coord_to_position(lat, lng, distance);
        self.tween = Some(CameraTween::new(
            self.camera.position,
            target,
            self.options.focus_duration(),
        ));
        self.logger.record(&format!(
            "focusing on ({:.4}, {:.4}) at distance {}",
            lat, lng, distance
        ));
        target
    }

    /// Focuses on the highlight marker.
    pub fn focus_highlight(&mut self, distance: f64) -> Vec3 {
        let HighlightMarker { lat, lng, .. } = self.options.highlight;
        self.focus(lat, lng, distance)
    }

    pub fn schedule_focus(&mut self, delay: Duration, lat: f64, lng: f64, distance: f64) {
        self.scheduled_focus = Some(ScheduledFocus {
            remaining: delay,
            lat,
            lng,
            distance,
        });
    }

    pub fn focus_target(&self) -> Option<Vec3> {
        self.tween.as_ref().map(CameraTween::target)
    }

    pub fn set_auto_rotate(&mut self, enabled: bool, speed: f64) {
        self.auto_rotate = enabled;
        self.rotation_speed = speed;
    }

    /// Drags the camera around the globe. Ignored without orbit controls.
    pub fn orbit(&mut self, d_azimuth: f64, d_polar: f64) -> bool {
        match self.controls.as_mut() {
            Some(controls) => {
                controls.nudge(d_azimuth, d_polar);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.options.width = width;
        self.options.height = height;
        self.camera.set_viewport(width, height);
        if self.acquired {
            self.surface.set_viewport(width, height);
        }
    }

    /// Re-plays the current layer point by point at the configured interval.
    pub fn reveal(&mut self) {
        self.reveal_every(self.options.reveal_interval());
    }

    pub fn reveal_every(&mut self, interval: Duration) {
        self.reveal = Some(Reveal {
            interval,
            elapsed: Duration::ZERO,
        });
    }

    /// Stops the render loop and releases the surface. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.render_loop.stop() {
            self.logger.record("render loop stopped");
        }
        if self.acquired {
            self.surface.release();
            self.acquired = false;
        }
        self.tween = None;
        self.scheduled_focus = None;
        self.reveal = None;
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn has_orbit_controls(&self) -> bool {
        self.controls.is_some()
    }

    /// Committed point layer; observations first, highlight marker last.
    pub fn layer(&self) -> &[GlobePoint] {
        &self.layer
    }

    /// Points currently handed to the surface (a prefix of the layer while revealing).
    pub fn shown_points(&self) -> &[GlobePoint] {
        &self.layer[..self.shown]
    }

    pub fn options(&self) -> &GlobeOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: RenderSurface> VisibleSetObserver for GlobePresenter<S> {
    fn on_visible_set(&mut self, visible: &VisibleSet) {
        self.set_records(visible);
    }
}

impl<S: RenderSurface> Drop for GlobePresenter<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
