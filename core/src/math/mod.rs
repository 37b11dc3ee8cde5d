pub mod easing;
pub mod projection;

pub use easing::ease_power2_in_out;
pub use projection::{coord_to_position, spin_about_poles, ProjectedPoint, ViewProjection};

/// Scene-space vector (Y up, globe centered at the origin).
pub type Vec3 = nalgebra::Vector3<f64>;
