use crate::output::OutputWriter;
use crate::output_types::{FileOutput, FileStatus, FolderOutput};
use crate::progress::{create_progress_bar, finish_error, finish_success};
use indicatif::ProgressBar;
use photokml_core::{FileOutcome, FolderSummary, ScanSession, ScanSummary};
use std::path::PathBuf;
use tabled::Tabled;

/// Summary of scanning every requested folder
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub folders: Vec<ScanSummary>,
}

impl BatchSummary {
    /// Total candidate files found
    pub fn total_files(&self) -> usize {
        self.folders.iter().map(|f| f.discovered).sum()
    }

    /// Files that produced a placemark
    pub fn success_count(&self) -> usize {
        self.folders.iter().map(|f| f.success_count()).sum()
    }

    /// Files without a usable position, unreadable ones included
    pub fn failure_count(&self) -> usize {
        self.folders
            .iter()
            .map(|f| f.missing_gps_count() + f.unreadable_count())
            .sum()
    }

    /// Folders that could not be read at all
    pub fn failed_folders(&self) -> impl Iterator<Item = &ScanSummary> {
        self.folders.iter().filter(|f| f.folder_error.is_some())
    }

    /// Per-folder counts, with exported counts taken from the KML folders
    pub fn folder_outputs(&self, exported: Option<&[FolderSummary]>) -> Vec<FolderOutput> {
        self.folders
            .iter()
            .map(|summary| FolderOutput {
                folder: summary.folder.clone(),
                discovered: summary.discovered,
                geotagged: summary.success_count(),
                missing_gps: summary.missing_gps_count(),
                unreadable: summary.unreadable_count(),
                exported: exported.map(|folders| {
                    folders
                        .iter()
                        .filter(|f| f.name == summary.folder)
                        .map(|f| f.exported)
                        .sum()
                }),
                error: summary.folder_error.clone(),
            })
            .collect()
    }

    /// Every scanned file with its outcome
    pub fn file_outputs(&self) -> Vec<FileOutput> {
        self.folders
            .iter()
            .flat_map(|summary| summary.outcomes.iter())
            .map(file_output)
            .collect()
    }

    /// Display summary to output
    pub fn display(&self, output: &OutputWriter, exported: Option<&[FolderSummary]>) {
        output.section("Scan Summary");
        output.kv("Total Files", self.total_files());
        output.kv("Geotagged", self.success_count());
        output.kv("Without GPS", self.failure_count());

        output.section("Summary by Folder");
        let rows: Vec<FolderRow> = self
            .folder_outputs(exported)
            .into_iter()
            .map(FolderRow::from)
            .collect();
        output.table(rows);

        for summary in self.failed_folders() {
            output.warning(format!(
                "Could not scan folder {}: {}",
                summary.folder,
                summary.folder_error.as_deref().unwrap_or("unknown error")
            ));
        }
    }
}

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Files")]
    discovered: usize,
    #[tabled(rename = "Geotagged")]
    geotagged: usize,
    #[tabled(rename = "No GPS")]
    missing_gps: usize,
    #[tabled(rename = "Unreadable")]
    unreadable: usize,
    #[tabled(rename = "Exported")]
    exported: String,
}

impl From<FolderOutput> for FolderRow {
    fn from(folder: FolderOutput) -> Self {
        Self {
            folder: folder.folder,
            discovered: folder.discovered,
            geotagged: folder.geotagged,
            missing_gps: folder.missing_gps,
            unreadable: folder.unreadable,
            exported: folder
                .exported
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn file_output(outcome: &FileOutcome) -> FileOutput {
    match outcome {
        FileOutcome::Geotagged(placemark) => FileOutput {
            path: placemark.label.clone(),
            status: FileStatus::Geotagged,
            latitude: Some(placemark.latitude()),
            longitude: Some(placemark.longitude()),
            reason: None,
        },
        FileOutcome::MissingGps { path, reason } => FileOutput {
            path: path.display().to_string(),
            status: FileStatus::MissingGps,
            latitude: None,
            longitude: None,
            reason: Some(reason.clone()),
        },
        FileOutcome::Unreadable { path, reason } => FileOutput {
            path: path.display().to_string(),
            status: FileStatus::Unreadable,
            latitude: None,
            longitude: None,
            reason: Some(reason.clone()),
        },
    }
}

/// Scan each folder into the session, one progress bar per folder
pub fn scan_folders(
    session: &mut ScanSession,
    folders: &[PathBuf],
    output: &OutputWriter,
) -> BatchSummary {
    let mut batch = BatchSummary::default();

    for folder in folders {
        let pb = if output.is_json() {
            ProgressBar::hidden()
        } else {
            create_progress_bar(&format!("Scanning {}", folder.display()))
        };

        let summary = session.scan_folder_with_progress(folder, |done, total, _| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        });

        match summary.folder_error {
            Some(ref error) => finish_error(&pb, &format!("{}: {}", folder.display(), error)),
            None => finish_success(
                &pb,
                &format!(
                    "{} of {} files have coordinates in {}",
                    summary.success_count(),
                    summary.discovered,
                    folder.display()
                ),
            ),
        }
        batch.folders.push(summary);
    }

    batch
}
