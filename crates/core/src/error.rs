//! Boundary errors for generator construction and configuration loading.
//!
//! Generation itself never fails; degraded layouts are reported on the
//! descriptor instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("grid dimension {value} exceeds the supported maximum of {max}")]
    DimensionTooLarge { value: usize, max: usize },

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("could not read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse TOML config: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("could not parse JSON config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
