use std::path::PathBuf;

use thiserror::Error;

/// A rejected stage transition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    #[error("stage {stage} cannot be greater than {maximum}")]
    AboveMaximum { stage: u32, maximum: u32 },

    #[error("stage {stage} cannot be lower than 1")]
    BelowMinimum { stage: u32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("a progress bar needs at least 2 stages, got {0}")]
    TooFewStages(u32),

    #[error("invalid current stage: {0}")]
    Stage(#[from] StageError),

    #[error("{field} must be a finite value {requirement}, got {value}")]
    InvalidDimension {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot create a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to write PNG {path}: {message}")]
    Png { path: PathBuf, message: String },
}
