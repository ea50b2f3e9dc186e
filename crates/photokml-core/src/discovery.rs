//! Recursive discovery of candidate image files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::formats::FormatRegistry;

/// Recursively collect files under `root` that a registered reader supports
///
/// The returned paths are sorted so that scans are deterministic. Symlinked
/// directories are not followed. Unreadable subdirectories are logged and
/// skipped; only an unreadable `root` is an error.
pub fn discover_images(root: &Path, registry: &FormatRegistry) -> Result<Vec<PathBuf>> {
    let mut discovered = Vec::new();
    walk(root, registry, &mut discovered, true)?;
    discovered.sort();
    Ok(discovered)
}

fn walk(
    dir: &Path,
    registry: &FormatRegistry,
    discovered: &mut Vec<PathBuf>,
    is_root: bool,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if is_root => return Err(e.into()),
        Err(e) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            walk(&path, registry, discovered, false)?;
            continue;
        }

        if path.is_file() && registry.is_supported(&path) {
            discovered.push(path);
        }
    }

    Ok(())
}
