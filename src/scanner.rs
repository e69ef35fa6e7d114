//! Directory scanning and file metadata collection.
//!
//! The scanner walks a directory tree recursively and produces one
//! [`FileRecord`] per regular file it can read. Per-file failures are reported
//! as warnings and the file is skipped; a failure to read the root directory
//! itself aborts the scan with an empty result.

use crate::config::ScanFilters;
use crate::progress::Event;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Metadata for one regular file discovered during a scan.
///
/// `path` is kept current across the run: the relocator rewrites it after each
/// successful move, so it always names the file's present on-disk location.
/// Everything else is captured once at scan time and never re-read.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Current location of the file on disk.
    pub path: PathBuf,
    /// Base filename, extension included.
    pub name: String,
    /// File extension without the leading dot, raw casing preserved.
    /// Empty string when the file has no extension.
    pub extension: String,
    /// Size in bytes at scan time.
    pub size_bytes: u64,
    /// Last-modified timestamp at scan time.
    pub modified: SystemTime,
    /// Creation timestamp at scan time. Falls back to `modified` on
    /// filesystems that do not report creation times.
    pub created: SystemTime,
}

impl FileRecord {
    fn read(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let modified = metadata.modified()?;
        let created = metadata.created().unwrap_or(modified);

        Ok(FileRecord {
            path: path.to_path_buf(),
            name,
            extension,
            size_bytes: metadata.len(),
            modified,
            created,
        })
    }
}

/// Scans `root` recursively and returns a record for every readable regular
/// file. Record ordering is arbitrary; callers must not rely on it.
pub fn scan(root: &Path, sink: &mut dyn FnMut(&Event)) -> Vec<FileRecord> {
    scan_filtered(root, None, sink)
}

/// Like [`scan`], but drops files rejected by the given filters.
///
/// When `filters` is `None` every regular file is included. Symlinks are not
/// followed. An error on the root itself emits an `Error` event and returns
/// an empty list; any other per-entry error emits a `Warning` and the walk
/// continues.
pub fn scan_filtered(
    root: &Path,
    filters: Option<&ScanFilters>,
    sink: &mut dyn FnMut(&Event),
) -> Vec<FileRecord> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    sink(&Event::Error(format!(
                        "Could not access folder {}: {}",
                        root.display(),
                        err
                    )));
                    return Vec::new();
                }
                let shown = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                sink(&Event::Warning(format!("Could not access {}: {}", shown, err)));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(filters) = filters
            && !filters.should_include(entry.path())
        {
            continue;
        }

        match FileRecord::read(entry.path()) {
            Ok(record) => records.push(record),
            Err(err) => {
                sink(&Event::Warning(format!(
                    "Could not access file {}: {}",
                    entry.path().display(),
                    err
                )));
            }
        }
    }

    records
}
