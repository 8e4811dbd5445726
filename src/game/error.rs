use std::path::PathBuf;

use thiserror::Error;

/// A game configuration that cannot be played
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small, need at least {min}x{min}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("grid {width}x{height} is too large, at most {max}x{max} is supported")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("snake of length {length} does not fit below the centre of a grid {height} rows high")]
    SnakeDoesNotFit { length: usize, height: usize },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// High score persistence failure
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
