//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which executes the cases of a
//! suite file in one session and produces the log, the JSON summary and the
//! HTML report.
//!
//! 此模块实现 `run` 命令，在一个会话中执行套件文件的用例，
//! 并生成日志、JSON 摘要和 HTML 报告。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{
        config::load_suite_config,
        execution::run_suite,
        session::Session,
    },
    infra::t,
    reporting::console::print_summary,
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `config` - Path to the suite configuration file
/// * `html` - Optional path for the HTML report
/// * `fail_fast` - Stop at the first failing case, on top of the suite setting
/// * `lang` - Language passed with `--lang`, which wins over the suite's
///
/// # Returns
/// An error when the session could not be set up, the reports could not be
/// written, or any case failed
pub async fn execute(
    config: PathBuf,
    html: Option<PathBuf>,
    fail_fast: bool,
    lang: Option<String>,
) -> Result<()> {
    let mut suite = load_suite_config(&config)
        .with_context(|| t!("run.config_load_failed", path = config.display()).to_string())?;
    suite.fail_fast |= fail_fast;

    let locale = crate::resolve_locale(lang.as_deref().or(suite.language.as_deref()));
    rust_i18n::set_locale(&locale);

    if suite.cases.is_empty() {
        println!("{}", t!("run.no_cases", locale = &locale).yellow());
    } else {
        println!(
            "{}",
            t!(
                "run.starting",
                locale = &locale,
                suite = &suite.suite,
                count = suite.cases.len()
            )
            .bold()
        );
    }

    let mut session = Session::open(suite, &locale)?;
    if let Some(path) = html {
        session.set_html_path(path);
    }

    let progress = run_suite(&mut session).await;
    if progress.skipped > 0 {
        println!(
            "{}",
            t!("run.skipped_after_failure", locale = &locale, count = progress.skipped).yellow()
        );
    }

    let report = session.finish()?;
    print_summary(&report.summary, &locale);

    if !report.is_success() {
        anyhow::bail!(t!("run.failures", locale = &locale, count = report.summary.failed).to_string());
    }
    Ok(())
}
