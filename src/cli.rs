//! Command-line interface for sortdir.
//!
//! The CLI is the presentation layer over the sorting core: it parses
//! arguments, wires a progress-bar-aware sink into the sorter, and renders
//! previews. A GUI host would call the same `FileSorter` entry points.

use crate::config::FilterConfig;
use crate::output::OutputFormatter;
use crate::policy::SortPolicy;
use crate::progress::Event;
use crate::sorter::FileSorter;
use clap::{Parser, Subcommand, ValueEnum};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Sort a directory's files into subfolders.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort the files under a directory into bucket subfolders.
    Sort {
        /// Directory to sort.
        dir: PathBuf,
        /// Sorting policy to apply.
        #[arg(long = "by", value_enum)]
        policy: PolicyArg,
        /// Optional TOML filter configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show what a scan finds without moving anything.
    Preview {
        /// Directory to inspect.
        dir: PathBuf,
        /// Also show which bucket each file would land in.
        #[arg(long = "by", value_enum)]
        policy: Option<PolicyArg>,
    },
    /// List the available sorting policies.
    Policies,
}

/// CLI spelling of the sorting policies.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Bucket per file extension.
    Type,
    /// Bucket per creation month and year.
    Date,
    /// Bucket per first letter of the filename.
    Alpha,
    /// Bucket per size class.
    Size,
}

impl From<PolicyArg> for SortPolicy {
    fn from(arg: PolicyArg) -> SortPolicy {
        match arg {
            PolicyArg::Type => SortPolicy::ByFileType,
            PolicyArg::Date => SortPolicy::ByDate,
            PolicyArg::Alpha => SortPolicy::Alphabetically,
            PolicyArg::Size => SortPolicy::BySize,
        }
    }
}

/// Executes a parsed CLI invocation.
pub fn run_cli(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Sort {
            dir,
            policy,
            config,
        } => sort_command(&dir, policy.into(), config.as_deref()),
        Command::Preview { dir, policy } => preview_command(&dir, policy.map(SortPolicy::from)),
        Command::Policies => {
            OutputFormatter::header("Available sorting policies");
            for policy in SortPolicy::ALL {
                OutputFormatter::plain(&format!("  {}", policy.label()));
            }
            Ok(())
        }
    }
}

fn sort_command(dir: &Path, policy: SortPolicy, config: Option<&Path>) -> Result<(), String> {
    OutputFormatter::info(&format!("Sorting contents of: {}", dir.display()));

    let filters = FilterConfig::load(config)
        .map_err(|e| format!("Error loading configuration: {}", e))?
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    // The bar is created lazily on the first Moved event, once the total is
    // known, and lives outside the sink so it can be finished afterwards.
    let bar = RefCell::new(None);
    let ok = {
        let mut sorter = FileSorter::new(|event: &Event| {
            if let Event::Moved {
                done,
                total,
                name,
                bucket,
            } = event
            {
                let mut slot = bar.borrow_mut();
                let bar = slot
                    .get_or_insert_with(|| OutputFormatter::create_progress_bar(*total as u64));
                bar.set_position(*done as u64);
                bar.set_message(format!("Moved {} to {}/", name, bucket));
            } else {
                OutputFormatter::render_event(event, bar.borrow().as_ref());
            }
        })
        .with_filters(filters);
        sorter.sort(dir, policy)
    };

    if let Some(bar) = bar.borrow_mut().take() {
        bar.finish_and_clear();
    }

    if ok {
        OutputFormatter::success("Sorting operation completed.");
        Ok(())
    } else {
        Err("Sorting operation failed. Please check the messages above.".to_string())
    }
}

fn preview_command(dir: &Path, policy: Option<SortPolicy>) -> Result<(), String> {
    OutputFormatter::info(&format!("Previewing contents of: {}", dir.display()));

    let mut sorter = FileSorter::new(|event: &Event| {
        if event.is_warning() || event.is_error() {
            OutputFormatter::render_event(event, None);
        }
    });
    let records = sorter.preview(dir);

    if records.is_empty() {
        OutputFormatter::plain("No files found.");
        return Ok(());
    }

    OutputFormatter::header("Files found");
    let mut bucket_counts: HashMap<String, usize> = HashMap::new();

    for record in &records {
        match policy.and_then(|p| p.classify(record)) {
            Some(bucket) => {
                OutputFormatter::plain(&format!(
                    " - {} ({} bytes) → {}/",
                    record.name, record.size_bytes, bucket
                ));
                *bucket_counts.entry(bucket).or_insert(0) += 1;
            }
            None => {
                OutputFormatter::plain(&format!(" - {} ({} bytes)", record.name, record.size_bytes));
            }
        }
    }

    if policy.is_some() {
        OutputFormatter::bucket_table(&bucket_counts, records.len());
    } else {
        OutputFormatter::plain(&format!("\nTotal files: {}", records.len()));
    }

    OutputFormatter::success("Preview complete. No files were modified.");
    Ok(())
}
