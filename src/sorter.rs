//! Sort run orchestration.
//!
//! [`FileSorter`] owns the progress sink and drives a run through its phases:
//! validate the root, scan, relocate under the selected policy, then prune
//! empty directories. The terminal outcome is a single boolean; everything
//! more detailed is carried by the emitted events.
//!
//! The sorter is synchronous and single-threaded. A host UI that must stay
//! responsive runs `sort` on its own worker thread and marshals the events
//! back to its rendering context; the sorter itself makes no threading
//! assumptions.

use crate::cleanup;
use crate::config::ScanFilters;
use crate::policy::SortPolicy;
use crate::progress::Event;
use crate::relocator;
use crate::scanner::{self, FileRecord};
use std::path::Path;

/// Drives sort runs and reports progress to a caller-supplied sink.
///
/// # Examples
///
/// ```no_run
/// use sortdir::policy::SortPolicy;
/// use sortdir::sorter::FileSorter;
/// use std::path::Path;
///
/// let mut sorter = FileSorter::new(|event| println!("{}", event));
/// let ok = sorter.sort(Path::new("/home/user/Downloads"), SortPolicy::ByFileType);
/// if !ok {
///     eprintln!("sort did not complete");
/// }
/// ```
pub struct FileSorter<'a> {
    sink: Box<dyn FnMut(&Event) + 'a>,
    filters: Option<ScanFilters>,
}

impl<'a> FileSorter<'a> {
    /// Creates a sorter reporting to the given sink.
    pub fn new(sink: impl FnMut(&Event) + 'a) -> Self {
        FileSorter {
            sink: Box::new(sink),
            filters: None,
        }
    }

    /// Creates a sorter that prints every event to stdout.
    pub fn stdout() -> FileSorter<'static> {
        FileSorter::new(|event: &Event| println!("{}", event))
    }

    /// Restricts sorting to files accepted by the given filters.
    /// Preview is unaffected; it always shows the full scan.
    pub fn with_filters(mut self, filters: ScanFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    fn emit(&mut self, event: Event) {
        (self.sink)(&event);
    }

    /// Checks that `root` is a usable sort target, reporting the first
    /// problem found: blank path, missing path, or non-directory path.
    pub fn validate(&mut self, root: &Path) -> bool {
        if root.as_os_str().is_empty() {
            self.emit(Event::Error("No folder path provided.".to_string()));
            return false;
        }
        if !root.exists() {
            self.emit(Event::Error(
                "Path does not exist or is invalid!".to_string(),
            ));
            return false;
        }
        if !root.is_dir() {
            self.emit(Event::Error("Path is not a directory!".to_string()));
            return false;
        }
        self.emit(Event::Info("Path validated successfully.".to_string()));
        true
    }

    /// Sorts `root` under the given policy. Returns true when the run
    /// completed, even if individual files were skipped with warnings.
    pub fn sort(&mut self, root: &Path, policy: SortPolicy) -> bool {
        self.validate(root) && self.run(root, policy)
    }

    /// Sorts `root` under the policy named by `label` (see
    /// [`SortPolicy::label`]). An unknown label fails before any scan.
    pub fn sort_by_label(&mut self, root: &Path, label: &str) -> bool {
        if !self.validate(root) {
            return false;
        }
        match SortPolicy::from_label(label) {
            Some(policy) => self.run(root, policy),
            None => {
                self.emit(Event::Error(format!("Invalid sorting method \"{}\"", label)));
                false
            }
        }
    }

    /// Scans `root` and returns the records without touching the filesystem,
    /// for read-only display.
    pub fn preview(&mut self, root: &Path) -> Vec<FileRecord> {
        scanner::scan(root, &mut self.sink)
    }

    fn run(&mut self, root: &Path, policy: SortPolicy) -> bool {
        self.emit(Event::Info("Scanning files...".to_string()));
        let mut records = scanner::scan_filtered(root, self.filters.as_ref(), &mut self.sink);

        if records.is_empty() {
            // Zero files is an expected outcome, not a fault.
            self.emit(Event::Info(
                "No files found in the specified folder or unable to access files.".to_string(),
            ));
            return false;
        }

        self.emit(Event::Info(format!("Found {} files to sort.", records.len())));
        self.emit(Event::Info(format!("Sorting {}...", policy.label())));

        match relocator::relocate(root, &mut records, policy, &mut self.sink) {
            Ok(stats) => {
                self.emit(Event::Info(format!(
                    "Files moved successfully. Processed {} out of {} files.",
                    stats.moved, stats.total
                )));
                self.emit(Event::Info("Deleting empty folders...".to_string()));
                cleanup::delete_empty_dirs(root, &mut self.sink);
                self.emit(Event::Info(
                    "Sorting operation completed successfully!".to_string(),
                ));
                true
            }
            Err(err) => {
                self.emit(Event::Error(err.to_string()));
                self.emit(Event::Info("Sorting operation failed.".to_string()));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::File;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn recording_sorter() -> (Rc<RefCell<Vec<String>>>, FileSorter<'static>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        let sorter = FileSorter::new(move |event: &Event| {
            sink_log.borrow_mut().push(event.to_string());
        });
        (log, sorter)
    }

    #[test]
    fn test_validate_blank_path() {
        let (log, mut sorter) = recording_sorter();
        assert!(!sorter.validate(Path::new("")));
        assert_eq!(log.borrow().as_slice(), ["Error: No folder path provided."]);
    }

    #[test]
    fn test_validate_missing_path() {
        let (log, mut sorter) = recording_sorter();
        assert!(!sorter.validate(Path::new("/nope/nothing/here")));
        assert_eq!(
            log.borrow().as_slice(),
            ["Error: Path does not exist or is invalid!"]
        );
    }

    #[test]
    fn test_validate_file_is_not_a_directory() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("plain.txt");
        File::create(&file).expect("create");

        let (log, mut sorter) = recording_sorter();
        assert!(!sorter.validate(&file));
        assert_eq!(log.borrow().as_slice(), ["Error: Path is not a directory!"]);
    }

    #[test]
    fn test_unknown_label_fails_without_scanning() {
        let temp = TempDir::new().expect("temp dir");
        File::create(temp.path().join("a.txt")).expect("create");

        let (log, mut sorter) = recording_sorter();
        assert!(!sorter.sort_by_label(temp.path(), "By Color"));

        let events = log.borrow();
        assert!(events.iter().any(|e| e.contains("By Color") && e.starts_with("Error:")));
        assert!(!events.iter().any(|e| e.contains("Scanning")));
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_empty_root_is_unsuccessful_but_quiet() {
        let temp = TempDir::new().expect("temp dir");
        let (log, mut sorter) = recording_sorter();

        assert!(!sorter.sort(temp.path(), SortPolicy::BySize));
        let events = log.borrow();
        assert!(events.iter().any(|e| e.contains("No files found")));
        assert!(events.iter().all(|e| !e.starts_with("Error:")));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let temp = TempDir::new().expect("temp dir");
        File::create(temp.path().join("a.txt")).expect("create");

        let (_, mut sorter) = recording_sorter();
        let records = sorter.preview(temp.path());

        assert_eq!(records.len(), 1);
        assert!(temp.path().join("a.txt").exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
