use crate::record::VisibleSet;
use std::sync::{Arc, Mutex};

/// Failure while obtaining a record batch from the remote endpoint.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("format error: {0}")]
    Format(String),
}

/// Failure reported by a rendering surface.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("surface unavailable: {0}")]
    Unavailable(String),
    #[error("render failure: {0}")]
    Render(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Consumer of the visible subset published by the filter state.
pub trait VisibleSetObserver {
    fn on_visible_set(&mut self, visible: &VisibleSet);
}

/// Observer handle shared between the filter state and the component's owner.
pub type SharedObserver = Arc<Mutex<dyn VisibleSetObserver + Send>>;
