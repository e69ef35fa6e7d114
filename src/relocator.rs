//! File relocation into bucket directories.
//!
//! This module performs the destructive half of a sort run: it creates every
//! bucket directory up front, then moves each file into its bucket. Moves are
//! idempotent (a file whose parent already matches its bucket is left alone)
//! and per-file failures are downgraded to warnings so one unreadable file
//! never aborts the batch.

use crate::policy::SortPolicy;
use crate::progress::Event;
use crate::scanner::FileRecord;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that abort an entire relocation pass.
///
/// Per-file move failures are not represented here: they are reported through
/// the progress sink as warnings and the pass continues.
#[derive(Debug)]
pub enum SortError {
    /// The sort root is missing or not a directory.
    InvalidRoot { path: PathBuf, source: io::Error },
    /// A bucket directory could not be created before moving began.
    BucketCreationFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path, source } => {
                write!(f, "Invalid sort root {}: {}", path.display(), source)
            }
            Self::BucketCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create bucket folder {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRoot { source, .. } => Some(source),
            Self::BucketCreationFailed { source, .. } => Some(source),
        }
    }
}

/// Outcome counters for one relocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStats {
    /// Files actually moved. No-op skips and warned files are not counted.
    pub moved: usize,
    /// Total records handed to the pass.
    pub total: usize,
}

/// Moves every record into its bucket under `root`.
///
/// The full set of distinct buckets is created before any file is touched; a
/// failure in that phase aborts the pass with no files moved. After that,
/// each record is classified with `policy`, moved to `root/bucket/name`, and
/// its `path` updated in place. A record already sitting in its bucket is
/// skipped silently; a record that fails to move is skipped with a warning.
///
/// Emits one [`Event::Moved`] per file actually moved, with a running counter
/// over moved files only.
pub fn relocate(
    root: &Path,
    records: &mut [FileRecord],
    policy: SortPolicy,
    sink: &mut dyn FnMut(&Event),
) -> Result<MoveStats, SortError> {
    if !root.is_dir() {
        return Err(SortError::InvalidRoot {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    // BTreeSet keeps the bucket listing stable for logging.
    let buckets: BTreeSet<String> = records
        .iter()
        .filter_map(|record| policy.classify(record))
        .collect();

    sink(&Event::Info(format!(
        "Unique buckets found: {}",
        buckets.iter().cloned().collect::<Vec<_>>().join(", ")
    )));

    for bucket in &buckets {
        let bucket_dir = root.join(bucket);
        fs::create_dir_all(&bucket_dir).map_err(|e| SortError::BucketCreationFailed {
            path: bucket_dir.clone(),
            source: e,
        })?;
    }

    sink(&Event::Info("Moving files to respective folders...".to_string()));

    let total = records.len();
    let mut moved = 0;

    for record in records.iter_mut() {
        let Some(bucket) = policy.classify(record) else {
            sink(&Event::Warning(format!(
                "Skipping {}: file has no name to classify",
                record.path.display()
            )));
            continue;
        };

        let bucket_dir = root.join(&bucket);
        let target = bucket_dir.join(&record.name);

        // Already in the right bucket: repeated runs stay non-destructive.
        if record.path.parent() == Some(bucket_dir.as_path()) {
            continue;
        }

        match move_file(&record.path, &target) {
            Ok(()) => {
                record.path = target;
                moved += 1;
                sink(&Event::Moved {
                    done: moved,
                    total,
                    name: record.name.clone(),
                    bucket,
                });
            }
            Err(err) => {
                sink(&Event::Warning(format!(
                    "Could not move {}: {}",
                    record.name, err
                )));
            }
        }
    }

    Ok(MoveStats { moved, total })
}

/// Moves a file, preferring an atomic rename and falling back to copy+delete
/// when rename fails (cross-device moves, most commonly).
fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    fs::copy(source, target)?;
    fs::remove_file(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn record_for(path: &Path) -> FileRecord {
        let metadata = fs::metadata(path).expect("metadata");
        FileRecord {
            path: path.to_path_buf(),
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: metadata.len(),
            modified: metadata.modified().expect("modified"),
            created: metadata.created().unwrap_or(std::time::SystemTime::UNIX_EPOCH),
        }
    }

    #[test]
    fn test_relocate_creates_buckets_and_moves() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("notes.txt");
        File::create(&file).expect("create");

        let mut records = vec![record_for(&file)];
        let mut events = Vec::new();
        let stats = relocate(
            temp.path(),
            &mut records,
            SortPolicy::ByFileType,
            &mut |e| events.push(e.clone()),
        )
        .expect("relocate");

        assert_eq!(stats, MoveStats { moved: 1, total: 1 });
        assert!(temp.path().join("txt").join("notes.txt").exists());
        assert!(!file.exists());
        assert_eq!(records[0].path, temp.path().join("txt").join("notes.txt"));
        assert!(events.iter().any(|e| matches!(e, Event::Moved { .. })));
    }

    #[test]
    fn test_relocate_skips_already_placed_files() {
        let temp = TempDir::new().expect("temp dir");
        let bucket = temp.path().join("txt");
        fs::create_dir(&bucket).expect("mkdir");
        let file = bucket.join("placed.txt");
        File::create(&file).expect("create");

        let mut records = vec![record_for(&file)];
        let mut events = Vec::new();
        let stats = relocate(
            temp.path(),
            &mut records,
            SortPolicy::ByFileType,
            &mut |e| events.push(e.clone()),
        )
        .expect("relocate");

        assert_eq!(stats.moved, 0);
        assert!(file.exists());
        assert!(!events.iter().any(|e| matches!(e, Event::Moved { .. })));
    }

    #[test]
    fn test_relocate_missing_root_is_fatal() {
        let result = relocate(
            Path::new("/no/such/root"),
            &mut [],
            SortPolicy::BySize,
            &mut |_| {},
        );
        assert!(matches!(result, Err(SortError::InvalidRoot { .. })));
    }

    #[test]
    fn test_relocate_counts_only_moved_files() {
        let temp = TempDir::new().expect("temp dir");
        let bucket = temp.path().join("txt");
        fs::create_dir(&bucket).expect("mkdir");

        // one already placed, one to move
        File::create(bucket.join("old.txt")).expect("create");
        let mut fresh = File::create(temp.path().join("new.txt")).expect("create");
        fresh.write_all(b"x").expect("write");

        let mut records = vec![
            record_for(&bucket.join("old.txt")),
            record_for(&temp.path().join("new.txt")),
        ];
        let mut counters = Vec::new();
        let stats = relocate(
            temp.path(),
            &mut records,
            SortPolicy::ByFileType,
            &mut |e| {
                if let Event::Moved { done, total, .. } = e {
                    counters.push((*done, *total));
                }
            },
        )
        .expect("relocate");

        assert_eq!(stats, MoveStats { moved: 1, total: 2 });
        assert_eq!(counters, vec![(1, 2)]);
    }
}
