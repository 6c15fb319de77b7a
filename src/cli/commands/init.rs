//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a starter suite
//! configuration file.
//!
//! 此模块实现 `init` 命令，用于写入初始的套件配置文件。

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};

use crate::infra::t;

const DEFAULT_CONFIG: &str = r#"# E2E Suite Configuration / E2E 套件配置

# Suite name, used in log and report file names / 套件名称，用于日志和报告文件名
suite = "e2e"
# Language of console and report labels / 控制台和报告标签的语言
language = "en"
# Report heading / 报告标题
title = "E2E Test Report"
# Stop after the first failing case / 第一个用例失败后停止
fail_fast = false

[output]
log_dir = "logs"
reports_dir = "reports"
summary_file = "test_execution_summary.json"
# Fixed report file name; a timestamped name is used when omitted
# 固定的报告文件名；省略时使用带时间戳的文件名
# html_file = "report.html"

# Test Cases / 测试用例
[[cases]]
name = "Desktop smoke" # Name shown in the report / 报告中显示的名称
command = "python -m pytest desktop/tests -x" # Exit code 0 means passed / 退出码 0 表示通过
# Optional timeout in seconds / 可选的超时时间（秒）
timeout_secs = 600
# Files attached to the outcome / 附加到结果的文件
artifacts = ["screenshots/*.png"]

[[cases]]
name = "API contract"
command = "python -m pytest api/tests"
working_dir = "."
artifacts = ["request_response_logs/*.json"]
"#;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `locale` - Language of the printed messages
///
/// # Errors
/// Fails when the file exists without `force`, or cannot be written.
pub fn execute(output: PathBuf, force: bool, locale: &str) -> Result<()> {
    if output.exists() && !force {
        println!("{}", t!("init.use_force", locale = locale).yellow());
        anyhow::bail!(t!("init.file_exists", locale = locale, path = output.display()).to_string());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", locale = locale, path = parent.display()).to_string()
        })?;
    }

    fs::write(&output, DEFAULT_CONFIG).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));
    Ok(())
}
