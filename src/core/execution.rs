//! # Case Execution Module / 用例执行模块
//!
//! Runs test cases inside a [`Session`]: each case is timed, optionally bounded
//! by a timeout, logged when it starts and ends, and recorded exactly once as a
//! [`TestOutcome`]. Suite cases are external commands whose exit status decides
//! the verdict.
//!
//! 在 [`Session`] 中运行测试用例：每个用例都会计时、可选地受超时限制、在开始和结束时记录日志，
//! 并且恰好被记录一次为 [`TestOutcome`]。套件用例是外部命令，其退出状态决定结果。

use anyhow::Result;
use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::{
    core::{
        artifacts::collect_artifacts,
        config::SuiteCase,
        models::{ApiCall, TestOutcome, TestStatus},
        session::Session,
    },
    infra::{command::run_command, logger::Logger},
};

/// Lines of command output kept as the details of a failed suite case.
const FAILURE_TAIL_LINES: usize = 20;

/// What a passing case body hands back.
/// 通过的用例体返回的内容。
#[derive(Debug, Clone, Default)]
pub struct CaseReport {
    details: String,
    screenshots: Vec<PathBuf>,
    api: Option<ApiCall>,
}

impl CaseReport {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            ..Self::default()
        }
    }

    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshots.push(path.into());
        self
    }

    pub fn with_screenshots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.screenshots.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_api(mut self, api: ApiCall) -> Self {
        self.api = Some(api);
        self
    }
}

/// A case failure that carries evidence captured before the case gave up.
///
/// Return it from a case body as `Err(CaseFailure::new(..).into())`. Any other
/// error also fails the case, with its message chain as the details.
///
/// 携带用例放弃前已捕获证据的失败。其他任何错误同样会使用例失败，并以其消息链作为详情。
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CaseFailure {
    message: String,
    screenshots: Vec<PathBuf>,
    api: Option<ApiCall>,
}

impl CaseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            screenshots: Vec::new(),
            api: None,
        }
    }

    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshots.push(path.into());
        self
    }

    pub fn with_screenshots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.screenshots.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_api(mut self, api: ApiCall) -> Self {
        self.api = Some(api);
        self
    }
}

/// How far a suite got.
/// 套件的执行进度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteProgress {
    pub executed: usize,
    /// Cases left out after a failure with `fail_fast` set.
    pub skipped: usize,
}

/// Runs one test case body and records its outcome in the session.
///
/// The body passes with a [`CaseReport`] and fails with any error. A body
/// still running when `timeout` elapses is dropped and the case fails with
/// "Timed out after N seconds".
///
/// # Arguments
/// * `session` - The run the outcome belongs to
/// * `name` - Test name as shown in the report
/// * `timeout` - Optional upper bound on the body's run time
/// * `body` - Produces the future that performs the test
///
/// # Returns
/// The recorded outcome
pub async fn run_case<F, Fut>(
    session: &mut Session,
    name: &str,
    timeout: Option<Duration>,
    body: F,
) -> TestOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<CaseReport>>,
{
    let outcome = execute(session.logger(), name, timeout, body).await;
    session.record(outcome.clone());
    outcome
}

async fn execute<F, Fut>(
    logger: &Logger,
    name: &str,
    timeout: Option<Duration>,
    body: F,
) -> TestOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<CaseReport>>,
{
    logger.info(format!("Starting test: {}", name));
    let start = Instant::now();

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, body()).await {
            Ok(result) => result,
            Err(_) => Err(CaseFailure::new(format!(
                "Timed out after {} seconds",
                limit.as_secs_f64()
            ))
            .into()),
        },
        None => body().await,
    };
    let elapsed = start.elapsed();

    let outcome = match result {
        Ok(report) => {
            let mut outcome = TestOutcome::passed(name, elapsed)
                .with_details(report.details)
                .with_artifacts(report.screenshots);
            if let Some(api) = report.api {
                outcome = outcome.with_api(api);
            }
            outcome
        }
        Err(error) => match error.downcast::<CaseFailure>() {
            Ok(failure) => {
                let mut outcome = TestOutcome::failed(name, elapsed, failure.message)
                    .with_artifacts(failure.screenshots);
                if let Some(api) = failure.api {
                    outcome = outcome.with_api(api);
                }
                outcome
            }
            Err(error) => TestOutcome::failed(name, elapsed, format!("{:#}", error)),
        },
    };

    match outcome.status() {
        TestStatus::Pass => logger.info(format!(
            "PASS: {} ({:.2}s)",
            name,
            outcome.duration_seconds()
        )),
        TestStatus::Fail => logger.error(format!(
            "FAIL: {} ({:.2}s) - {}",
            name,
            outcome.duration_seconds(),
            outcome.details()
        )),
    }
    outcome
}

/// Runs a suite case's command and records the outcome.
///
/// Exit status 0 passes. A failing command keeps the tail of its output as
/// details. Files matching the case's artifact patterns are attached either
/// way.
pub async fn run_command_case(session: &mut Session, case: &SuiteCase) -> TestOutcome {
    let work_dir = session.config().case_dir(case);
    let base_dir = session.config().base_dir.clone();
    let logger = session.logger().clone();
    let timeout = case.timeout_secs.map(Duration::from_secs);

    run_case(session, &case.name, timeout, || async move {
        let work_dir = work_dir?;
        logger.info(format!("Running '{}' in {}", case.command, work_dir.display()));
        let output = run_command(&case.command, &work_dir).await?;
        let artifacts = collect_artifacts(&base_dir, &case.artifacts)?;

        if output.success {
            Ok(CaseReport::new(output.tail(FAILURE_TAIL_LINES)).with_screenshots(artifacts))
        } else {
            let code = output
                .code
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            let tail = output.tail(FAILURE_TAIL_LINES);
            let message = if tail.is_empty() {
                format!("Command exited with {}", code)
            } else {
                format!("Command exited with {}:\n{}", code, tail)
            };
            Err(CaseFailure::new(message).with_screenshots(artifacts).into())
        }
    })
    .await
}

/// Runs every case of the session's suite in order.
///
/// With `fail_fast` set in the suite, the first failure stops the run and the
/// remaining cases are counted as skipped.
pub async fn run_suite(session: &mut Session) -> SuiteProgress {
    let cases = session.config().cases.clone();
    let fail_fast = session.config().fail_fast;
    let mut progress = SuiteProgress {
        executed: 0,
        skipped: 0,
    };

    for (index, case) in cases.iter().enumerate() {
        let outcome = run_command_case(session, case).await;
        progress.executed += 1;

        if fail_fast && !outcome.is_pass() {
            progress.skipped = cases.len() - index - 1;
            if progress.skipped > 0 {
                session.logger().warning(format!(
                    "Stopping after failure of '{}': {} case(s) skipped",
                    case.name, progress.skipped
                ));
            }
            break;
        }
    }
    progress
}
