//! Error types for photokml

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoKmlError {
    // Per-file scan errors
    #[error("Cannot read metadata from {path}: {reason}")]
    FileUnreadable { path: PathBuf, reason: String },

    #[error("No GPS data in {path}: missing {tag}")]
    GpsMissing { path: PathBuf, tag: String },

    #[error("Invalid GPS data in {path}: {reason}")]
    InvalidGps { path: PathBuf, reason: String },

    // Export errors
    #[error("Could not save KML file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<quick_xml::Error> for PhotoKmlError {
    fn from(err: quick_xml::Error) -> Self {
        PhotoKmlError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PhotoKmlError>;
