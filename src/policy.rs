//! Sorting policies and bucket classification.
//!
//! A [`SortPolicy`] maps a [`FileRecord`] to the name of the subdirectory
//! ("bucket") the file belongs in. Classification is a pure function of the
//! record's attributes: it never looks at the disk, at scan order, or at
//! which bucket directories already exist.
//!
//! # Examples
//!
//! ```
//! use sortdir::policy::SortPolicy;
//!
//! assert_eq!(SortPolicy::from_label("By Size"), Some(SortPolicy::BySize));
//! assert_eq!(SortPolicy::ByDate.label(), "By Date");
//! assert!(SortPolicy::from_label("By Color").is_none());
//! ```

use crate::scanner::FileRecord;
use chrono::{DateTime, Local};
use std::time::SystemTime;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Bucket used by the file-type policy for files without an extension.
pub const NO_EXTENSION_BUCKET: &str = "No_Extension";

/// One of the four selectable sorting strategies.
///
/// Policies are selected by their stable human-readable label (see
/// [`SortPolicy::label`]); the label set and its order are part of the public
/// contract and must not change between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortPolicy {
    /// Bucket per file extension, `No_Extension` for files without one.
    ByFileType,
    /// Bucket per creation month and year, e.g. `Jan_2024`.
    ByDate,
    /// Bucket per upper-cased first character of the filename.
    Alphabetically,
    /// Bucket per size class, from `Tiny (<10KB)` to `Huge (>1GB)`.
    BySize,
}

impl SortPolicy {
    /// All policies, in the order they are presented to callers.
    pub const ALL: [SortPolicy; 4] = [
        SortPolicy::ByFileType,
        SortPolicy::ByDate,
        SortPolicy::Alphabetically,
        SortPolicy::BySize,
    ];

    /// The stable display label for this policy.
    pub fn label(self) -> &'static str {
        match self {
            SortPolicy::ByFileType => "By File Type",
            SortPolicy::ByDate => "By Date",
            SortPolicy::Alphabetically => "Alphabetically",
            SortPolicy::BySize => "By Size",
        }
    }

    /// Resolves a display label back to its policy. Returns `None` for an
    /// unknown label; callers must treat that as a configuration error.
    pub fn from_label(label: &str) -> Option<SortPolicy> {
        SortPolicy::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Computes the bucket name for a record under this policy.
    ///
    /// Returns `None` only for the one unclassifiable case: an empty filename
    /// under the alphabetical policy. The relocator warns and skips such
    /// records instead of indexing into an empty string.
    pub fn classify(self, record: &FileRecord) -> Option<String> {
        match self {
            SortPolicy::ByFileType => Some(if record.extension.is_empty() {
                NO_EXTENSION_BUCKET.to_string()
            } else {
                record.extension.clone()
            }),
            SortPolicy::ByDate => Some(month_year_label(record.created)),
            SortPolicy::Alphabetically => record
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect()),
            SortPolicy::BySize => Some(size_class(record.size_bytes).to_string()),
        }
    }
}

/// Formats a timestamp as a `Mon_YYYY` bucket label in local time.
fn month_year_label(timestamp: SystemTime) -> String {
    let local: DateTime<Local> = timestamp.into();
    local.format("%b_%Y").to_string()
}

/// Maps a byte count to its size-class bucket. Boundaries are binary
/// (1024-based) and half-open: a boundary value belongs to the upper class.
fn size_class(size_bytes: u64) -> &'static str {
    if size_bytes < 10 * KIB {
        "Tiny (<10KB)"
    } else if size_bytes < MIB {
        "Small (10KB-1MB)"
    } else if size_bytes < 100 * MIB {
        "Medium (1MB-100MB)"
    } else if size_bytes < GIB {
        "Large (100MB-1GB)"
    } else {
        "Huge (>1GB)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn record(name: &str, extension: &str, size_bytes: u64) -> FileRecord {
        FileRecord {
            path: PathBuf::from(name),
            name: name.to_string(),
            extension: extension.to_string(),
            size_bytes,
            modified: SystemTime::UNIX_EPOCH,
            created: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_label_roundtrip_and_order() {
        let labels: Vec<_> = SortPolicy::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec!["By File Type", "By Date", "Alphabetically", "By Size"]
        );
        for policy in SortPolicy::ALL {
            assert_eq!(SortPolicy::from_label(policy.label()), Some(policy));
        }
        assert_eq!(SortPolicy::from_label("by size"), None);
    }

    #[test]
    fn test_file_type_buckets() {
        let policy = SortPolicy::ByFileType;
        assert_eq!(policy.classify(&record("a.txt", "txt", 0)).unwrap(), "txt");
        assert_eq!(
            policy.classify(&record("c", "", 0)).unwrap(),
            NO_EXTENSION_BUCKET
        );
    }

    #[test]
    fn test_alphabetical_uppercases_first_char() {
        let policy = SortPolicy::Alphabetically;
        assert_eq!(policy.classify(&record("apple.txt", "txt", 0)).unwrap(), "A");
        assert_eq!(policy.classify(&record("Apple.txt", "txt", 0)).unwrap(), "A");
        assert_eq!(policy.classify(&record("7zip.exe", "exe", 0)).unwrap(), "7");
    }

    #[test]
    fn test_alphabetical_empty_name_is_unclassifiable() {
        assert_eq!(
            SortPolicy::Alphabetically.classify(&record("", "", 0)),
            None
        );
    }

    #[test]
    fn test_size_class_boundaries() {
        let policy = SortPolicy::BySize;
        assert_eq!(policy.classify(&record("f", "", 0)).unwrap(), "Tiny (<10KB)");
        assert_eq!(
            policy.classify(&record("f", "", 10 * KIB - 1)).unwrap(),
            "Tiny (<10KB)"
        );
        assert_eq!(
            policy.classify(&record("f", "", 10 * KIB)).unwrap(),
            "Small (10KB-1MB)"
        );
        assert_eq!(
            policy.classify(&record("f", "", MIB - 1)).unwrap(),
            "Small (10KB-1MB)"
        );
        assert_eq!(
            policy.classify(&record("f", "", MIB)).unwrap(),
            "Medium (1MB-100MB)"
        );
        assert_eq!(
            policy.classify(&record("f", "", 100 * MIB)).unwrap(),
            "Large (100MB-1GB)"
        );
        assert_eq!(
            policy.classify(&record("f", "", GIB)).unwrap(),
            "Huge (>1GB)"
        );
    }

    #[test]
    fn test_date_bucket_uses_creation_month_and_year() {
        let created = Local.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let mut rec = record("f.txt", "txt", 0);
        rec.created = created.into();
        // modified in a different month must not matter
        rec.modified = Local.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap().into();

        assert_eq!(SortPolicy::ByDate.classify(&rec).unwrap(), "Jan_2024");
    }

    #[test]
    fn test_date_bucket_same_month_collides() {
        let mut first = record("a", "", 0);
        let mut second = record("b", "", 0);
        first.created = Local.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap().into();
        second.created = Local.with_ymd_and_hms(2023, 11, 30, 23, 59, 59).unwrap().into();

        assert_eq!(
            SortPolicy::ByDate.classify(&first),
            SortPolicy::ByDate.classify(&second)
        );
    }
}
