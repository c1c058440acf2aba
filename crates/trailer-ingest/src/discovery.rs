//! Result report discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Lists every CSV file below `dir`, descending into subdirectories.
///
/// Symbolic links are not followed, so a link back to an ancestor cannot
/// loop. Returns paths sorted so runs are migrated in a stable order.
pub fn discover_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| IngestError::DirectoryRead {
            path: err.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            source: err,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let is_csv = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
