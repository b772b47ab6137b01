//! File-level analysis pipeline.
//!
//! Reads an access log, runs the aggregation pass and records metadata about
//! the run, returning an [`AnalysisReport`] ready for rendering.

use std::path::{Path, PathBuf};

use chrono::Utc;
use forensics_core::models::{LogFormat, TrafficSummary};
use forensics_core::Result;
use tracing::{debug, warn};

use crate::aggregator::summarize;
use crate::reader::read_log_lines;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the summary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// The log file that was analysed.
    pub source: PathBuf,
    /// Grammar the lines were parsed with.
    pub format: LogFormat,
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Lines read from the file, including blank and malformed ones.
    pub lines_read: usize,
    /// Lines that matched the grammar.
    pub lines_parsed: u64,
    /// Lines that did not match the grammar.
    pub lines_skipped: u64,
    /// Wall-clock seconds spent reading the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent in the aggregation pass.
    pub summarize_time_seconds: f64,
}

/// The complete output of [`analyze_file`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub summary: TrafficSummary,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Read and decode the lines of `path`.
/// 2. Summarize them under `format`, bounding lists by `top`.
/// 3. Return an [`AnalysisReport`].
///
/// Fails only when the file cannot be read.
pub fn analyze_file(path: &Path, top: usize, format: LogFormat) -> Result<AnalysisReport> {
    // ── Step 1: Load lines ────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let lines = read_log_lines(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Summarize ─────────────────────────────────────────────────────
    let summarize_start = std::time::Instant::now();
    let summary = summarize(&lines, top, format);
    let summarize_time = summarize_start.elapsed().as_secs_f64();

    let lines_read = lines.len();
    let lines_skipped = lines_read as u64 - summary.total;

    if lines_read > 0 && summary.total == 0 {
        warn!(
            "No lines in {} matched the {} format",
            path.display(),
            format
        );
    }

    debug!(
        "Parsed {} of {} lines from {} ({} skipped) in {:.3}s",
        summary.total,
        lines_read,
        path.display(),
        lines_skipped,
        load_time + summarize_time
    );

    // ── Step 3: Build report ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        source: path.to_path_buf(),
        format,
        generated_at: Utc::now().to_rfc3339(),
        lines_read,
        lines_parsed: summary.total,
        lines_skipped,
        load_time_seconds: load_time,
        summarize_time_seconds: summarize_time,
    };

    Ok(AnalysisReport { summary, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
