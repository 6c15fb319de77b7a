//! # Render Command Module / 渲染命令模块
//!
//! This module implements the `render` command, which turns an existing JSON
//! run summary into an HTML report without running anything.
//!
//! 此模块实现 `render` 命令，无需运行任何用例即可将已有的 JSON 运行摘要转换为 HTML 报告。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::{
    infra::t,
    reporting::html::{self, RenderOptions},
};

/// Executes the render command with the provided arguments.
///
/// # Arguments
/// * `summary` - Path of the JSON summary
/// * `output` - Optional report path; defaults to a timestamped file next to the summary
/// * `title` - Optional report heading
/// * `locale` - Language of the report labels
pub fn execute(summary: PathBuf, output: Option<PathBuf>, title: Option<String>, locale: &str) -> Result<()> {
    let options = RenderOptions {
        title,
        locale: locale.to_string(),
    };
    let path = html::render(&summary, output.as_deref(), &options)?;

    println!(
        "{}",
        t!("footer_html_report", locale = locale, path = path.display()).green()
    );
    Ok(())
}
