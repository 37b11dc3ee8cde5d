//! Core state and presentation contract for the SAR globe visualizer.
//!
//! Records flow from a [`source::DataSource`] into a [`filter::FilterState`],
//! which publishes the visible subset to the [`presenter::GlobePresenter`] and
//! the [`stats::StatsPanel`]. [`dashboard::SarDashboard`] wires one of each.

pub mod api;
pub mod dashboard;
pub mod filter;
pub mod math;
pub mod prelude;
pub mod presenter;
pub mod record;
pub mod source;
pub mod stats;
pub mod telemetry;

pub use prelude::{LoadError, SharedObserver, SurfaceError, VisibleSetObserver};
