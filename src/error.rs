//! Crate-level error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;

/// Errors that stop a session or keep it from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to access settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("invalid display size {width}x{height}")]
    InvalidDisplay { width: i32, height: i32 },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to start position source: {0}")]
    TrackingSpawn(#[source] io::Error),

    #[error("position source thread panicked")]
    TrackingPanicked,
}
