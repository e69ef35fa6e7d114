//! Progress reporting for sort runs.
//!
//! Every step of a sort run is reported through a caller-supplied sink as an
//! [`Event`]. The sink is a plain `FnMut(&Event)`: it is called synchronously,
//! in order, once per event, and the core never blocks on or retries delivery.
//! Hosts that only speak text can rely on the `Display` rendering, which
//! carries stable `Error:` / `Warning:` / `Progress:` prefixes.

use std::fmt;

/// A single progress notification emitted during a sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Informational message: validation confirmations, phase banners,
    /// per-folder cleanup notices, completion.
    Info(String),
    /// A single file or directory could not be read, moved, or deleted.
    /// The run continues without it.
    Warning(String),
    /// A fatal pre-flight failure: bad path, unknown policy, unreadable root,
    /// bucket creation failure.
    Error(String),
    /// One file was moved into its bucket. `done` counts only files actually
    /// moved so far, not no-op skips.
    Moved {
        done: usize,
        total: usize,
        name: String,
        bucket: String,
    },
}

impl Event {
    /// Returns true for `Warning` events.
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::Warning(_))
    }

    /// Returns true for `Error` events.
    pub fn is_error(&self) -> bool {
        matches!(self, Event::Error(_))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Info(msg) => write!(f, "{}", msg),
            Event::Warning(msg) => write!(f, "Warning: {}", msg),
            Event::Error(msg) => write!(f, "Error: {}", msg),
            Event::Moved {
                done,
                total,
                name,
                bucket,
            } => {
                write!(f, "Progress: {}/{} - Moved {} to {}/", done, total, name, bucket)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_event_rendering() {
        let event = Event::Moved {
            done: 2,
            total: 3,
            name: "photo.jpg".to_string(),
            bucket: "jpg".to_string(),
        };
        assert_eq!(event.to_string(), "Progress: 2/3 - Moved photo.jpg to jpg/");
    }

    #[test]
    fn test_severity_prefixes() {
        assert_eq!(
            Event::Warning("disk full".to_string()).to_string(),
            "Warning: disk full"
        );
        assert_eq!(
            Event::Error("bad path".to_string()).to_string(),
            "Error: bad path"
        );
        assert_eq!(Event::Info("done".to_string()).to_string(), "done");
    }

    #[test]
    fn test_severity_predicates() {
        assert!(Event::Warning(String::new()).is_warning());
        assert!(Event::Error(String::new()).is_error());
        assert!(!Event::Info(String::new()).is_warning());
        assert!(!Event::Info(String::new()).is_error());
    }
}
