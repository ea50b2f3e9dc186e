use serde::Serialize;

/// Per-folder counts shared by the export and scan commands
#[derive(Debug, Serialize)]
pub struct FolderOutput {
    pub folder: String,
    pub discovered: usize,
    pub geotagged: usize,
    pub missing_gps: usize,
    pub unreadable: usize,
    pub exported: Option<usize>,
    pub error: Option<String>,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub output: String,
    pub map_name: String,
    pub min_distance: f64,
    pub placemarks_exported: usize,
    pub placemarks_total: usize,
    pub folders: Vec<FolderOutput>,
}

/// Output for scan command
#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub min_distance: f64,
    pub placemarks_total: usize,
    pub placemarks_included: usize,
    pub placemarks_excluded: usize,
    pub folders: Vec<FolderOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileOutput>>,
}

/// One scanned file
#[derive(Debug, Serialize)]
pub struct FileOutput {
    pub path: String,
    pub status: FileStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Geotagged,
    MissingGps,
    Unreadable,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_file: Option<String>,
    pub map_name: ConfigValue<String>,
    pub description: ConfigValue<String>,
    pub min_distance: ConfigValue<f64>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: String,
}
