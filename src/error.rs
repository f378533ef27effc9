//! Error type shared by image loading, configuration, and the window surface.
//!
//! Parameter values never produce errors: out-of-domain slider positions are
//! corrected by [`crate::params::sanitize`] instead.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunerError {
    #[error("Unable to load image '{}': {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("window: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, TunerError>;
