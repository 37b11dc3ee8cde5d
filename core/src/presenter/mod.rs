pub mod camera;
pub mod globe;
pub mod render_loop;
pub mod surface;

pub use camera::{Camera, CameraOptions, CameraTween, OrbitControls, OrbitOptions};
pub use globe::{GlobeOptions, GlobePresenter};
pub use render_loop::{LoopState, RenderLoop};
pub use surface::RenderSurface;
