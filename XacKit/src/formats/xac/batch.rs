//! Batch XAC operations
//!
//! Finds XAC files in a directory tree and inspects them in parallel. Every
//! file gets its own decode, nothing is shared between them.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use super::inspect::{XacSummary, inspect_xac_with_options};
use super::options::DecodeOptions;

/// Progress of a batch run
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Files started so far (1-indexed)
    pub current: usize,
    /// Total files in the batch
    pub total: usize,
    /// File being processed
    pub current_file: String,
}

/// Outcome for one file of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub summary: Option<XacSummary>,
    pub error: Option<String>,
}

/// Result of a batch inspection
#[derive(Debug, Clone, Serialize)]
pub struct BatchInspectResult {
    /// Number of files that decoded
    pub success_count: usize,
    /// Number of files that failed to decode
    pub fail_count: usize,
    /// Per-file outcomes, in input order
    pub results: Vec<BatchEntry>,
}

/// Find all .xac files in a directory recursively
///
/// # Returns
/// A sorted list of paths to .xac files found in the directory tree.
pub fn find_xac_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut xac_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xac"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    xac_files.sort();
    xac_files
}

/// Inspect XAC files in parallel
///
/// A file that fails to decode is recorded with its error and does not stop
/// the batch.
pub fn batch_inspect<F>(files: &[PathBuf], options: &DecodeOptions, progress: F) -> BatchInspectResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let results: Vec<BatchEntry> = files
        .par_iter()
        .map(|path| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress {
                current,
                total,
                current_file: path.display().to_string(),
            });

            match inspect_xac_with_options(path, options) {
                Ok(summary) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    BatchEntry {
                        path: path.clone(),
                        summary: Some(summary),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to inspect {}: {}", path.display(), e);
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    BatchEntry {
                        path: path.clone(),
                        summary: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    BatchInspectResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}
