//! Scan command implementation

use crate::batch::scan_folders;
use crate::cli::ScanArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{FileStatus, ScanOutput};
use anyhow::Result;
use photokml_core::processing::count_included;
use photokml_core::ScanSession;
use std::path::Path;

pub fn execute(args: ScanArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let loaded =
        load_config_with_overrides(config_path, None, None, args.scan.min_distance.as_deref())?;
    let mut session = ScanSession::new(loaded.config.to_map_settings());

    let batch = scan_folders(&mut session, &args.scan.folders, output);
    let report = count_included(session.annotated());
    let min_distance = session.settings().min_distance;

    if output.is_json() {
        output.result(ScanOutput {
            min_distance,
            placemarks_total: report.total,
            placemarks_included: report.included,
            placemarks_excluded: report.excluded(),
            folders: batch.folder_outputs(None),
            files: args.files.then(|| batch.file_outputs()),
        })?;
        return Ok(());
    }

    batch.display(output, None);

    if args.files {
        output.section("Files");
        for file in batch.file_outputs() {
            match (file.status, file.latitude, file.longitude) {
                (FileStatus::Geotagged, Some(lat), Some(lon)) => {
                    output.info(format!("{} ({}, {})", file.path, lat, lon))
                }
                _ => output.warning(format!(
                    "{} - {}",
                    file.path,
                    file.reason.as_deref().unwrap_or("no position")
                )),
            }
        }
    }

    output.section("Filter");
    output.kv("Minimum distance", format!("{} m", min_distance));
    output.kv(
        "Placemarks to export",
        format!("{} / {}", report.included, report.total),
    );
    output.kv("Dropped as too close", report.excluded());

    Ok(())
}
