//! Empty-directory pruning after a sort run.
//!
//! Relocation pulls files out of nested directories, so a post-pass walks the
//! tree bottom-up and deletes every directory left with no files and no
//! subdirectories. Children are resolved before their parent, so a directory
//! that becomes empty only once its empty children are gone is still caught
//! in the same pass. The root itself is never a deletion candidate.

use crate::progress::Event;
use std::fs;
use std::io;
use std::path::Path;

/// Deletes every empty directory strictly below `root`, deepest first.
///
/// Failures to list or delete a directory are reported through the sink and
/// the pass continues with the remaining directories.
pub fn delete_empty_dirs(root: &Path, sink: &mut dyn FnMut(&Event)) {
    prune_children(root, sink);
}

fn prune_children(dir: &Path, sink: &mut dyn FnMut(&Event)) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            sink(&Event::Warning(format!(
                "Could not read directory {}: {}",
                dir.display(),
                err
            )));
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }

        prune_children(&path, sink);

        match is_empty(&path) {
            Ok(true) => match fs::remove_dir(&path) {
                Ok(()) => {
                    sink(&Event::Info(format!("Deleted empty folder: {}", path.display())));
                }
                Err(err) => {
                    sink(&Event::Error(format!(
                        "Error deleting folder {}: {}",
                        path.display(),
                        err
                    )));
                }
            },
            Ok(false) => {}
            Err(err) => {
                sink(&Event::Warning(format!(
                    "Could not inspect directory {}: {}",
                    path.display(),
                    err
                )));
            }
        }
    }
}

fn is_empty(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}
