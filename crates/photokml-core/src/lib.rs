//! photokml core - GPS extraction, ordering and KML export
//!
//! This crate reads GPS positions from photo metadata, orders and thins the
//! resulting placemarks, and writes them as a KML document grouped by folder.

pub mod config;
pub mod discovery;
pub mod error;
pub mod formats;
pub mod geo;
pub mod kml;
pub mod models;
pub mod processing;
pub mod session;

pub use error::{PhotoKmlError, Result};
pub use formats::{FormatRegistry, GpsPosition, GpsReader};
pub use kml::{build_kml, FolderSummary, KmlDocument};
pub use models::{AnnotatedPlacemark, MapSettings, Placemark};
pub use processing::{filter, reorder, FilterReport};
pub use session::{ExportReport, FileOutcome, ScanSession, ScanSummary};
