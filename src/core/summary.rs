//! # Summary Writer Module / 摘要写入模块
//!
//! Aggregates the outcomes of a run into a [`RunSummary`], persists it as
//! pretty-printed JSON and reads it back for rendering.
//!
//! 将一次运行的结果汇总为 [`RunSummary`]，以格式化 JSON 持久化，并在渲染时读回。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::ReportError;
use crate::core::models::{RunSummary, TestOutcome, TestStatus};
use crate::infra::fs::atomic_write;

/// Builds the summary of a run in a single pass over its outcomes.
///
/// # Arguments
/// * `outcomes` - Every outcome of the run, in execution order
///
/// # Returns
/// A summary stamped with the current local time
pub fn build(outcomes: Vec<TestOutcome>) -> RunSummary {
    let mut passed = 0;
    let mut failed = 0;
    let mut api_calls = 0usize;
    let mut response_time_total = 0.0;

    for outcome in &outcomes {
        match outcome.status() {
            TestStatus::Pass => passed += 1,
            TestStatus::Fail => failed += 1,
        }
        if let Some(api) = outcome.api() {
            api_calls += 1;
            response_time_total += api.response_time_ms;
        }
    }

    RunSummary {
        total: outcomes.len(),
        passed,
        failed,
        avg_response_time: (api_calls > 0).then(|| response_time_total / api_calls as f64),
        total_api_calls: (api_calls > 0).then_some(api_calls),
        generated_at: Local::now(),
        outcomes,
    }
}

/// Validates and writes the summary to `destination` atomically.
///
/// # Arguments
/// * `summary` - The summary to persist
/// * `destination` - Target JSON file; missing directories are created
///
/// # Returns
/// The path the summary was written to
///
/// # Errors
/// A summary that breaks its invariants, cannot be serialized or cannot be
/// written is an error. A run whose results cannot be stored must not pass
/// silently.
pub fn persist(summary: &RunSummary, destination: &Path) -> Result<PathBuf> {
    summary.validate()?;
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    atomic_write(destination, json.as_bytes())
        .with_context(|| format!("Failed to write run summary: {}", destination.display()))?;
    Ok(destination.to_path_buf())
}

/// Reads and validates a persisted summary.
///
/// # Errors
/// Returns [`ReportError::SummaryNotFound`] when `path` does not exist, and
/// [`ReportError::InvalidSummary`] when its contents are inconsistent.
pub fn load(path: &Path) -> Result<RunSummary> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ReportError::SummaryNotFound(path.to_path_buf()).into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read run summary: {}", path.display()));
        }
    };
    let summary: RunSummary = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse run summary: {}", path.display()))?;
    summary.validate()?;
    Ok(summary)
}
