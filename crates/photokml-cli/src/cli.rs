use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// photokml - Export geotagged photos as KML placemarks
#[derive(Parser, Debug)]
#[command(name = "photokml")]
#[command(about = "Export geotagged photos as KML placemarks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./photokml.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log progress details to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan photo folders and write a KML file
    Export(ExportArgs),

    /// Scan photo folders and report which files carry GPS data
    Scan(ScanArgs),

    /// Show the resolved configuration
    Config,
}

/// Options shared by commands that scan folders
#[derive(Args, Debug)]
pub struct ScanOptions {
    /// Folders to scan recursively; each becomes one KML folder
    #[arg(required = true, value_name = "FOLDERS")]
    pub folders: Vec<PathBuf>,

    /// Minimum distance between consecutive placemarks (e.g. "250", "250m", "1.5km")
    #[arg(long, value_name = "DISTANCE")]
    pub min_distance: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub scan: ScanOptions,

    /// Output KML file
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Map name written to the KML document
    #[arg(long)]
    pub name: Option<String>,

    /// Map description written to the KML document
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub scan: ScanOptions,

    /// List every file with its outcome
    #[arg(long)]
    pub files: bool,
}
