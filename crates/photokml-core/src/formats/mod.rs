//! Format abstraction layer for GPS metadata extraction
//!
//! Each image format implements the `GpsReader` trait, and the `FormatRegistry`
//! maps file extensions to the reader that understands them.

use std::path::Path;

use crate::error::{PhotoKmlError, Result};

pub mod exif_reader;

pub use exif_reader::ExifGpsReader;

/// Decimal-degree position extracted from a photo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reader that extracts a GPS position from an image file
pub trait GpsReader {
    /// Read the GPS position embedded in the file at `path`
    ///
    /// Returns `FileUnreadable` when the file or its metadata container cannot
    /// be parsed, and `GpsMissing`/`InvalidGps` when the metadata has no usable
    /// position.
    fn read_gps(&self, path: &Path) -> Result<GpsPosition>;

    /// File extensions handled by this reader, lowercase and without the dot
    fn supported_extensions(&self) -> &[&str];

    /// Human-readable format name
    fn format_name(&self) -> &str;
}

/// Central registry for GPS readers
pub struct FormatRegistry {
    readers: Vec<Box<dyn GpsReader>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Registry with the EXIF reader for JPEG and DNG files
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ExifGpsReader));
        registry
    }

    /// Register a GPS reader
    pub fn register(&mut self, reader: Box<dyn GpsReader>) {
        self.readers.push(reader);
    }

    /// Find the reader for a file
    ///
    /// Extension matching is case-sensitive: `photo.JPG` is not recognised.
    pub fn detect_format(&self, path: &Path) -> Result<&dyn GpsReader> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension))
            .map(|r| r.as_ref())
            .ok_or_else(|| PhotoKmlError::FileUnreadable {
                path: path.to_path_buf(),
                reason: format!(
                    "unsupported extension '{}' (supported: {})",
                    extension,
                    self.supported_formats().join(", ")
                ),
            })
    }

    /// Check whether any reader handles this file
    pub fn is_supported(&self, path: &Path) -> bool {
        self.detect_format(path).is_ok()
    }

    /// Get list of all supported format extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// Read the GPS position of a file with the matching reader
    pub fn read_gps(&self, path: &Path) -> Result<GpsPosition> {
        self.detect_format(path)?.read_gps(path)
    }

    /// Get all registered readers
    pub fn readers(&self) -> &[Box<dyn GpsReader>] {
        &self.readers
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
