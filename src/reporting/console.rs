//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints run results to the console: a colored per-test table,
//! the totals and the session footer naming the log file and the report.
//!
//! 此模块在控制台打印运行结果：彩色的逐项测试表、总计，以及指明日志文件和报告位置的会话页脚。

use colored::*;
use std::path::Path;

use crate::core::models::{RunSummary, TestStatus};
use crate::infra::t;

/// Prints a formatted summary of a run to the console.
/// Displays a table with test status, name and duration, using color coding
/// to highlight failures, followed by the totals and the pass rate.
///
/// 在控制台打印格式化的运行摘要。
/// 显示包含测试状态、名称和持续时间的表格，用颜色突出失败项，随后打印总计和通过率。
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary ---
///   - Passed   | Register user                            |      2.10s
///   - Failed   | Login                                    |      0.50s
///
/// Total: 2 | Passed: 1 | Failed: 1 | Pass rate: 50.0%
/// ```
pub fn print_summary(summary: &RunSummary, locale: &str) {
    println!("\n{}", t!("test_summary_banner", locale = locale).bold());

    for outcome in &summary.outcomes {
        let status_str = outcome.status().label(locale);
        let status_colored = match outcome.status() {
            TestStatus::Pass => status_str.green(),
            TestStatus::Fail => status_str.red(),
        };
        let duration_str = format!("{:.2}s", outcome.duration_seconds());

        println!(
            "  - {:<10} | {:<40} | {:>10}",
            status_colored,
            outcome.name(),
            duration_str
        );
    }

    let totals = t!(
        "summary_totals",
        locale = locale,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        rate = format!("{:.1}", summary.pass_rate())
    );
    if summary.has_failures() {
        println!("\n{}", totals.red().bold());
    } else {
        println!("\n{}", totals.green().bold());
    }

    if let Some(avg) = summary.avg_response_time {
        println!(
            "{}",
            t!("summary_avg_response", locale = locale, avg = format!("{:.1}", avg)).cyan()
        );
    }
}

/// Prints the end-of-run footer: always the log file, and the HTML report when
/// one was generated.
///
/// 打印运行结束页脚：始终显示日志文件；生成了 HTML 报告时显示其路径。
pub fn print_session_footer(log_path: &Path, html_path: Option<&Path>, locale: &str) {
    println!("\n{}", "=".repeat(30));
    println!("{}", t!("footer_log_file", locale = locale, path = log_path.display()));
    match html_path {
        Some(path) => println!(
            "{}",
            t!("footer_html_report", locale = locale, path = path.display()).green()
        ),
        None => println!("{}", t!("footer_no_html_report", locale = locale).yellow()),
    }
    println!("{}\n", "=".repeat(30));
}

/// Prints why the summary or report could not be produced.
/// 打印摘要或报告无法生成的原因。
pub fn print_report_failure(error: &anyhow::Error, locale: &str) {
    eprintln!(
        "{} {:#}",
        t!("report_generation_failed", locale = locale).red().bold(),
        error
    );
}
