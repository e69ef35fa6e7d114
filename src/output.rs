//! Terminal output formatting.
//!
//! Renders progress events and summaries for the CLI front end: severity
//! coloring, a progress bar for relocation, and a table of bucket counts for
//! previews. The sorting core never prints; everything on screen goes
//! through here.

use crate::progress::Event;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Stateless helpers for styled terminal output.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Green checkmark line for completed operations.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Red cross line on stderr for failures.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Yellow warning line for recovered per-file problems.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Cyan informational line.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Unstyled line.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Bold section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Progress bar sized for `total` file moves.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        bar
    }

    /// Renders one event with severity styling. `bar`, when present, is used
    /// so event lines do not tear an active progress bar.
    pub fn render_event(event: &Event, bar: Option<&ProgressBar>) {
        match event {
            Event::Moved { .. } => {
                // Moved events drive the bar itself; see the CLI sink.
            }
            Event::Warning(_) => {
                let line = format!("{} {}", "⚠".yellow(), event);
                Self::emit_line(&line, bar);
            }
            Event::Error(_) => {
                let line = format!("{} {}", "✗".red(), event);
                Self::emit_line(&line, bar);
            }
            Event::Info(msg) => Self::emit_line(msg, bar),
        }
    }

    fn emit_line(line: &str, bar: Option<&ProgressBar>) {
        match bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    /// Table of bucket names and file counts, sorted by bucket name.
    pub fn bucket_table(bucket_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let mut buckets: Vec<_> = bucket_counts.iter().collect();
        buckets.sort_by_key(|&(name, _)| name);

        let width = buckets
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(6);

        println!("{:<width$} | {}", "Bucket".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (bucket, count) in &buckets {
            let file_word = if **count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                bucket,
                count.to_string().green(),
                file_word,
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
            width = width
        );
    }
}
