//! # Show Command Module / 显示命令模块
//!
//! Prints a persisted run summary to the console.
//!
//! 在控制台打印已持久化的运行摘要。

use anyhow::Result;
use std::path::PathBuf;

use crate::{core::summary, reporting::console::print_summary};

/// Executes the show command.
///
/// # Errors
/// Fails when the summary is missing or invalid.
pub fn execute(summary_path: PathBuf, locale: &str) -> Result<()> {
    let summary = summary::load(&summary_path)?;
    print_summary(&summary, locale);
    Ok(())
}
