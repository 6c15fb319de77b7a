//! # Session Module / 会话模块
//!
//! A [`Session`] is the context object of one test run. It owns the run's
//! single [`Logger`] and [`ResultCollector`] and is passed by reference to
//! whatever executes test cases. Finishing the session drains the collector,
//! persists the summary, renders the HTML report and prints where everything
//! went.
//!
//! [`Session`] 是一次测试运行的上下文对象。它拥有本次运行唯一的 [`Logger`] 和
//! [`ResultCollector`]，并以引用方式传递给执行测试用例的代码。结束会话时会清空收集器、
//! 持久化摘要、渲染 HTML 报告并打印各文件的位置。

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::collector::ResultCollector;
use crate::core::config::SuiteConfig;
use crate::core::models::{RunSummary, TestOutcome};
use crate::core::summary;
use crate::infra::logger::Logger;
use crate::reporting::console::{print_report_failure, print_session_footer};
use crate::reporting::html::{self, RenderOptions};

/// What a finished session produced.
/// 会话结束后的产物。
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub summary: RunSummary,
    pub log_path: PathBuf,
    pub summary_path: PathBuf,
    /// `None` when the run recorded no outcomes.
    /// 运行未记录任何结果时为 `None`。
    pub html_path: Option<PathBuf>,
}

impl SessionReport {
    pub fn is_success(&self) -> bool {
        !self.summary.has_failures()
    }
}

#[derive(Debug)]
pub struct Session {
    config: SuiteConfig,
    locale: String,
    logger: Arc<Logger>,
    collector: ResultCollector,
    html_path: Option<PathBuf>,
}

impl Session {
    /// Starts a session, creating its log file.
    ///
    /// # Errors
    /// Fails when the log file cannot be opened.
    pub fn open(config: SuiteConfig, locale: &str) -> Result<Self> {
        let logger = Logger::open(config.log_path()?)?;
        Ok(Self::with_logger(config, logger, locale))
    }

    /// Starts a session around an already opened logger.
    pub fn with_logger(config: SuiteConfig, logger: Logger, locale: &str) -> Self {
        logger.info(format!("Test session started: suite '{}'", config.suite));
        Self {
            config,
            locale: locale.to_string(),
            logger: Arc::new(logger),
            collector: ResultCollector::new(),
            html_path: None,
        }
    }

    /// Overrides where the HTML report is written.
    pub fn set_html_path(&mut self, path: impl Into<PathBuf>) {
        self.html_path = Some(path.into());
    }

    /// The run's logger. Clone the handle to log from inside a test case body.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn record(&mut self, outcome: TestOutcome) {
        self.collector.record(outcome);
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        self.collector.outcomes()
    }

    /// Ends the run: persists the summary, renders the report when at least one
    /// outcome was recorded, and prints the log and report locations.
    ///
    /// # Errors
    /// Any failure writing the log, the summary or the report. The reason is
    /// printed before it is returned.
    pub fn finish(mut self) -> Result<SessionReport> {
        let log_path = self.logger.path().to_path_buf();
        let result = self.write_reports(&log_path);

        match &result {
            Ok(report) => print_session_footer(&log_path, report.html_path.as_deref(), &self.locale),
            Err(e) => {
                print_report_failure(e, &self.locale);
                print_session_footer(&log_path, None, &self.locale);
            }
        }
        result
    }

    fn write_reports(&mut self, log_path: &Path) -> Result<SessionReport> {
        let summary = summary::build(self.collector.drain());
        self.logger.info(format!(
            "Test session finished: {} total, {} passed, {} failed",
            summary.total, summary.passed, summary.failed
        ));

        let summary_path = summary::persist(&summary, &self.config.summary_path()?)?;
        self.logger
            .info(format!("Run summary written to {}", summary_path.display()));

        let html_path = if summary.total > 0 {
            let target = match &self.html_path {
                Some(path) => path.clone(),
                None => self.config.html_path()?,
            };
            let options = RenderOptions {
                title: self.config.title.clone(),
                locale: self.locale.clone(),
            };
            match html::render(&summary_path, Some(target.as_path()), &options) {
                Ok(path) => {
                    self.logger.info(format!("HTML report written to {}", path.display()));
                    Some(path)
                }
                Err(e) => {
                    self.logger.error(format!("Failed to generate HTML report: {:#}", e));
                    self.logger.check()?;
                    return Err(e);
                }
            }
        } else {
            self.logger.warning("No test results were recorded; skipping HTML report");
            None
        };

        self.logger.check()?;
        Ok(SessionReport {
            summary,
            log_path: log_path.to_path_buf(),
            summary_path,
            html_path,
        })
    }
}
