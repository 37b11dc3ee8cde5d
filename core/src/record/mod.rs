pub mod batch;
pub mod point;
pub mod sar;

pub use batch::{RecordBatch, VisibleSet};
pub use point::{GlobePoint, HighlightMarker};
pub use sar::{Frequency, Polarization, SarRecord, SurfaceType};
