//! Errors at the integration boundary
//!
//! Generation itself never fails. These cover caller-supplied canvases and
//! settings that are checked before a track is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("canvas must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("failed to parse generator settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackError>;
