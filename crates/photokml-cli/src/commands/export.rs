//! Export command implementation

use crate::batch::scan_folders;
use crate::cli::ExportArgs;
use crate::config_loader::load_config_with_overrides;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors::from_core;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::Result;
use photokml_core::{MapSettings, ScanSession};
use std::path::{Path, PathBuf};

pub fn execute(
    args: ExportArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let loaded = load_config_with_overrides(
        config_path,
        args.name,
        args.description,
        args.scan.min_distance.as_deref(),
    )?;
    let settings = loaded.config.to_map_settings();
    let mut session = ScanSession::new(settings);

    if dry_run {
        let actions = plan_export(&session, &args.scan.folders, &args.output);
        return display_planned_actions(output, &actions);
    }

    let batch = scan_folders(&mut session, &args.scan.folders, output);
    let report = session.save_kml_file(&args.output).map_err(from_core)?;

    let settings = session.settings();
    if output.is_json() {
        output.result(ExportOutput {
            output: report.path.display().to_string(),
            map_name: settings.name.clone(),
            min_distance: settings.min_distance,
            placemarks_exported: report.placemarks_exported,
            placemarks_total: report.placemarks_total,
            folders: batch.folder_outputs(Some(&report.folders)),
        })?;
    } else {
        output.success(format!(
            "Exported {} / {} placemarks to {}",
            report.placemarks_exported,
            report.placemarks_total,
            report.path.display()
        ));
        batch.display(output, Some(&report.folders));
    }

    Ok(())
}

fn plan_export(session: &ScanSession, folders: &[PathBuf], output: &Path) -> Vec<PlannedAction> {
    let mut actions: Vec<PlannedAction> = folders
        .iter()
        .map(|folder| {
            let action =
                PlannedAction::new(ActionType::ScanFolder, format!("Scan {}", folder.display()));
            match session.discover(folder) {
                Ok(files) => action.with_detail(format!("{} candidate image files", files.len())),
                Err(e) => action.with_detail(format!("Folder cannot be read: {}", e)),
            }
        })
        .collect();

    actions.push(write_action(session.settings(), output));
    actions
}

fn write_action(settings: &MapSettings, output: &Path) -> PlannedAction {
    PlannedAction::new(ActionType::WriteFile, format!("Write {}", output.display()))
        .with_detail(format!("Map name: {}", settings.name))
        .with_detail(format!("Description: {}", settings.description))
        .with_detail(format!("Minimum distance: {} m", settings.min_distance))
}
