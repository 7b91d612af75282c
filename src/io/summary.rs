//! Read/write run summary JSON files.
//!
//! The summary is the portable representation of a run:
//! - analysis windows and lag
//! - the fitted baseline parameters
//! - every (indicator, variant) regression outcome
//!
//! `tight show` re-renders the results table from it without refitting.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{BaselineParams, RegressionResult, RunConfig};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunWindows {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub baseline_end: NaiveDate,
    pub estimation_end: NaiveDate,
    pub lag: usize,
}

impl From<&RunConfig> for RunWindows {
    fn from(config: &RunConfig) -> Self {
        Self {
            start: config.start,
            end: config.end,
            baseline_end: config.baseline_end,
            estimation_end: config.estimation_end,
            lag: config.lag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub source: String,
    pub windows: RunWindows,
    pub baseline: BaselineParams,
    pub results: Vec<RegressionResult>,
}

impl SummaryFile {
    pub fn new(
        source: impl Into<String>,
        config: &RunConfig,
        baseline: &BaselineParams,
        results: &[RegressionResult],
    ) -> Self {
        Self {
            tool: "tight".to_string(),
            source: source.into(),
            windows: RunWindows::from(config),
            baseline: baseline.clone(),
            results: results.to_vec(),
        }
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::io(format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: SummaryFile =
        serde_json::from_reader(file).map_err(|e| AppError::config(format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}
