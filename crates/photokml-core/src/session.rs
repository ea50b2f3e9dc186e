//! Scan session: placemark collection, scanning and KML export

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::discovery::discover_images;
use crate::error::{PhotoKmlError, Result};
use crate::formats::FormatRegistry;
use crate::kml::{build_kml, FolderSummary, KmlDocument};
use crate::models::{AnnotatedPlacemark, MapSettings, Placemark};
use crate::processing::{filter, reorder};

/// Result of reading one candidate file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// GPS position found, placemark added
    Geotagged(Placemark),

    /// Metadata readable but without a usable position
    MissingGps { path: PathBuf, reason: String },

    /// File or metadata container could not be read
    Unreadable { path: PathBuf, reason: String },
}

impl FileOutcome {
    pub fn is_geotagged(&self) -> bool {
        matches!(self, FileOutcome::Geotagged(_))
    }
}

/// Summary of scanning one folder
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Scanned folder, also the group of every placemark it produced
    pub folder: String,

    /// Candidate files found
    pub discovered: usize,

    /// Per-file outcomes in discovery order
    pub outcomes: Vec<FileOutcome>,

    /// Set when the folder itself could not be read
    pub folder_error: Option<String>,
}

impl ScanSummary {
    fn new(folder: String) -> Self {
        Self {
            folder,
            discovered: 0,
            outcomes: Vec::new(),
            folder_error: None,
        }
    }

    /// Files that produced a placemark
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_geotagged()).count()
    }

    pub fn missing_gps_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::MissingGps { .. }))
            .count()
    }

    pub fn unreadable_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Unreadable { .. }))
            .count()
    }
}

/// Result of a successful KML export
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub placemarks_exported: usize,
    pub placemarks_total: usize,
    pub folders: Vec<FolderSummary>,
}

#[derive(Debug, Clone)]
struct OrderedPlacemarks {
    min_distance: f64,
    placemarks: Vec<AnnotatedPlacemark>,
}

/// Owns the placemarks collected during one run
///
/// Placemarks accumulate through [`ScanSession::scan_folder`] or
/// [`ScanSession::add_placemark`]. The sorted and distance-annotated sequence
/// is computed on the first export and cached until a placemark is added.
pub struct ScanSession {
    settings: MapSettings,
    registry: FormatRegistry,
    placemarks: Vec<Placemark>,
    ordered: Option<OrderedPlacemarks>,
}

impl ScanSession {
    /// Session reading JPEG and DNG files through EXIF
    pub fn new(settings: MapSettings) -> Self {
        Self::with_registry(settings, FormatRegistry::with_defaults())
    }

    pub fn with_registry(settings: MapSettings, registry: FormatRegistry) -> Self {
        Self {
            settings,
            registry,
            placemarks: Vec::new(),
            ordered: None,
        }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Change document settings; a new threshold is applied on the next export
    pub fn settings_mut(&mut self) -> &mut MapSettings {
        &mut self.settings
    }

    /// Placemarks in insertion order
    pub fn placemarks(&self) -> &[Placemark] {
        &self.placemarks
    }

    /// Whether the sorted sequence is cached
    pub fn is_ordered(&self) -> bool {
        self.ordered.is_some()
    }

    /// Append a placemark and invalidate the cached ordering
    pub fn add_placemark(
        &mut self,
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
        group: impl Into<String>,
    ) {
        self.push(Placemark::new(latitude, longitude, label, group));
    }

    fn push(&mut self, placemark: Placemark) {
        self.placemarks.push(placemark);
        self.ordered = None;
    }

    /// Candidate image files under `folder`, sorted
    pub fn discover(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        discover_images(folder, &self.registry)
    }

    /// Read one file and add its placemark to `group` when it has a position
    pub fn ingest_file(&mut self, path: &Path, group: &str) -> FileOutcome {
        match self.registry.read_gps(path) {
            Ok(position) => {
                let placemark = Placemark::new(
                    position.latitude,
                    position.longitude,
                    path.display().to_string(),
                    group,
                );
                debug!("Added placemark {}", placemark);
                self.push(placemark.clone());
                FileOutcome::Geotagged(placemark)
            }
            Err(PhotoKmlError::FileUnreadable { path, reason }) => {
                warn!("Could not read EXIF from file {}: {}", path.display(), reason);
                FileOutcome::Unreadable { path, reason }
            }
            Err(e) => {
                warn!("Could not extract GPS info from file {}: {}", path.display(), e);
                FileOutcome::MissingGps {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Recursively scan `folder`, adding one placemark per geotagged image
    ///
    /// The folder path, as given, becomes the group of its placemarks. Failures
    /// on individual files are recorded in the summary and never stop the scan.
    pub fn scan_folder(&mut self, folder: &Path) -> ScanSummary {
        self.scan_folder_with_progress(folder, |_, _, _| {})
    }

    /// Like [`ScanSession::scan_folder`], calling `on_file(done, total, outcome)`
    /// after each file
    pub fn scan_folder_with_progress<F>(&mut self, folder: &Path, mut on_file: F) -> ScanSummary
    where
        F: FnMut(usize, usize, &FileOutcome),
    {
        let group = folder.display().to_string();
        let mut summary = ScanSummary::new(group.clone());

        let files = match self.discover(folder) {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not scan folder {}: {}", group, e);
                summary.folder_error = Some(e.to_string());
                return summary;
            }
        };
        summary.discovered = files.len();

        for (index, file) in files.iter().enumerate() {
            let outcome = self.ingest_file(file, &group);
            on_file(index + 1, files.len(), &outcome);
            summary.outcomes.push(outcome);
        }

        info!(
            "{} files have coordinates in folder {}",
            summary.success_count(),
            group
        );
        summary
    }

    /// Sorted, distance-annotated and filtered placemarks
    ///
    /// Sorting and distances are computed once per collection state; only the
    /// inclusion filter is re-run when the threshold changed since last call.
    pub fn annotated(&mut self) -> &[AnnotatedPlacemark] {
        let min_distance = self.settings.min_distance;

        if let Some(ordered) = self.ordered.as_mut() {
            if ordered.min_distance != min_distance {
                let (placemarks, _) = filter(&ordered.placemarks, min_distance);
                *ordered = OrderedPlacemarks {
                    min_distance,
                    placemarks,
                };
            }
        }

        let placemarks = &self.placemarks;
        let ordered = self.ordered.get_or_insert_with(|| OrderedPlacemarks {
            min_distance,
            placemarks: reorder(placemarks, min_distance),
        });
        &ordered.placemarks
    }

    /// Build the KML document for the current collection
    pub fn to_kml(&mut self) -> Result<KmlDocument> {
        self.annotated();
        let placemarks = self
            .ordered
            .as_ref()
            .map(|o| o.placemarks.as_slice())
            .unwrap_or_default();
        build_kml(&self.settings, placemarks)
    }

    /// Write the KML document to `path`
    pub fn save_kml_file(&mut self, path: &Path) -> Result<ExportReport> {
        let document = self.to_kml()?;

        fs::write(path, &document.content).map_err(|source| {
            warn!("Could not save KML file {}: {}", path.display(), source);
            PhotoKmlError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!("KML file saved to {}", path.display());
        Ok(ExportReport {
            path: path.to_path_buf(),
            placemarks_exported: document.placemarks_exported(),
            placemarks_total: document.placemarks_total(),
            folders: document.folders,
        })
    }
}

impl fmt::Display for ScanSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "photokml session '{}' ({} placemarks)",
            self.settings.name,
            self.placemarks.len()
        )
    }
}
