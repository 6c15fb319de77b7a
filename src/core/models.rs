//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures flowing through the reporting
//! pipeline: the outcome of a single test case, optional API call metadata
//! and the summary of a whole run. Serialized field names are part of the
//! persisted summary format and must not change.
//!
//! 此模块定义了报告流水线中流转的数据结构：单个测试用例的结果、
//! 可选的 API 调用元数据以及整个运行的摘要。序列化字段名是持久化摘要格式的一部分，不得更改。

use crate::core::error::ReportError;
use crate::infra::t;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// The final status of a test case.
/// 测试用例的最终状态。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// Every expectation of the test case held.
    /// 测试用例的所有预期均成立。
    Pass,
    /// An expected page or API state did not hold, or the case timed out.
    /// 预期的页面或 API 状态不成立，或用例超时。
    Fail,
}

impl TestStatus {
    /// Gets the CSS class used for this status in HTML reports.
    pub fn css_class(&self) -> &'static str {
        match self {
            TestStatus::Pass => "passed",
            TestStatus::Fail => "failed",
        }
    }

    /// Gets the localized label of the status for display.
    /// 获取状态的本地化显示标签。
    pub fn label(&self, locale: &str) -> String {
        match self {
            TestStatus::Pass => t!("report.status_passed", locale = locale).to_string(),
            TestStatus::Fail => t!("report.status_failed", locale = locale).to_string(),
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => f.write_str("PASS"),
            TestStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// Metadata of the HTTP call an API test case made.
/// API 测试用例所发起的 HTTP 调用的元数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCall {
    /// Full URL of the endpoint / 端点的完整 URL
    #[serde(rename = "api_endpoint")]
    pub endpoint: String,
    /// HTTP method, e.g. "GET" / HTTP 方法，例如 "GET"
    #[serde(rename = "http_method")]
    pub method: String,
    /// Status code returned by the API / API 返回的状态码
    pub status_code: u16,
    /// Round-trip time in milliseconds / 往返时间（毫秒）
    pub response_time_ms: f64,
}

impl ApiCall {
    pub fn new(
        method: impl Into<String>,
        endpoint: impl Into<String>,
        status_code: u16,
        response_time: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into().to_uppercase(),
            status_code,
            response_time_ms: response_time.as_secs_f64() * 1000.0,
        }
    }
}

/// The recorded result of one executed test case.
///
/// An outcome is assembled once when its test case concludes and is not
/// modified after it has been handed to the collector, so its fields are
/// only readable through accessors.
///
/// 一个已执行测试用例的记录结果。
/// 结果在测试用例结束时一次性组装，交给收集器后不再修改，因此字段只能通过访问器读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(rename = "test_name")]
    name: String,
    status: TestStatus,
    /// Duration in seconds / 持续时间（秒）
    #[serde(rename = "duration")]
    duration_seconds: f64,
    #[serde(default)]
    details: String,
    /// Artifact paths (e.g. screenshots) in the order they were captured.
    /// 产物路径（例如截图），按捕获顺序排列。
    #[serde(rename = "screenshots", default)]
    artifacts: Vec<String>,
    #[serde(deserialize_with = "deserialize_local_time")]
    timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api: Option<ApiCall>,
}

impl TestOutcome {
    /// Creates an outcome stamped with the current local time.
    pub fn new(name: impl Into<String>, status: TestStatus, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status,
            duration_seconds: duration.as_secs_f64(),
            details: String::new(),
            artifacts: Vec::new(),
            timestamp: Local::now(),
            api: None,
        }
    }

    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self::new(name, TestStatus::Pass, duration)
    }

    pub fn failed(name: impl Into<String>, duration: Duration, details: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Fail, duration).with_details(details)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Appends artifact paths, keeping their order.
    /// 追加产物路径，保持其顺序。
    pub fn with_artifacts<I, P>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.artifacts.extend(
            artifacts
                .into_iter()
                .map(|p| p.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    pub fn with_api(mut self, api: ApiCall) -> Self {
        self.api = Some(api);
        self
    }

    /// Overrides the conclusion timestamp.
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }

    /// Gets the file names of the artifacts, in recorded order.
    /// Paths without a file name component are shown as they are.
    /// 获取产物的文件名，按记录顺序排列。
    pub fn artifact_names(&self) -> Vec<String> {
        self.artifacts
            .iter()
            .map(|artifact| {
                Path::new(artifact)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| artifact.clone())
            })
            .collect()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn api(&self) -> Option<&ApiCall> {
        self.api.as_ref()
    }

    /// Checks the values that JSON cannot represent faithfully.
    fn validate(&self) -> Result<(), ReportError> {
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(ReportError::InvalidSummary(format!(
                "test '{}' has an invalid duration: {}",
                self.name, self.duration_seconds
            )));
        }
        if let Some(api) = &self.api {
            if !api.response_time_ms.is_finite() || api.response_time_ms < 0.0 {
                return Err(ReportError::InvalidSummary(format!(
                    "test '{}' has an invalid response time: {}",
                    self.name, api.response_time_ms
                )));
            }
        }
        Ok(())
    }
}

/// The aggregate of one run, persisted once at session end.
///
/// Invariant: `total == outcomes.len() == passed + failed`.
///
/// 一次运行的汇总，在会话结束时持久化一次。
/// 不变量：`total == outcomes.len() == passed + failed`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(rename = "total_tests")]
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Mean response time (ms) of the outcomes that made an API call.
    /// 发起 API 调用的结果的平均响应时间（毫秒）。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_response_time: Option<f64>,
    /// Number of outcomes that made an API call; absent when none did.
    /// 发起 API 调用的结果数量；没有时省略。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_api_calls: Option<usize>,
    #[serde(rename = "execution_time", deserialize_with = "deserialize_local_time")]
    pub generated_at: DateTime<Local>,
    #[serde(rename = "test_results")]
    pub outcomes: Vec<TestOutcome>,
}

impl RunSummary {
    /// Gets the pass rate as a percentage. An empty run has a pass rate of 0.
    /// 以百分比形式获取通过率。空运行的通过率为 0。
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Verifies the counting invariant and every outcome's values.
    /// 校验计数不变量以及每个结果的值。
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.total != self.outcomes.len() {
            return Err(ReportError::InvalidSummary(format!(
                "total_tests is {} but {} results are listed",
                self.total,
                self.outcomes.len()
            )));
        }
        if self.passed + self.failed != self.total {
            return Err(ReportError::InvalidSummary(format!(
                "passed ({}) + failed ({}) does not equal total_tests ({})",
                self.passed, self.failed, self.total
            )));
        }
        let passed = self.outcomes.iter().filter(|o| o.is_pass()).count();
        if passed != self.passed {
            return Err(ReportError::InvalidSummary(format!(
                "passed is {} but {} results have status PASS",
                self.passed, passed
            )));
        }
        if let Some(calls) = self.total_api_calls {
            if calls > self.total {
                return Err(ReportError::InvalidSummary(format!(
                    "total_api_calls ({}) exceeds total_tests ({})",
                    calls, self.total
                )));
            }
        }
        if let Some(avg) = self.avg_response_time {
            if !avg.is_finite() {
                return Err(ReportError::InvalidSummary(format!(
                    "avg_response_time is not a finite number: {}",
                    avg
                )));
            }
        }
        self.outcomes.iter().try_for_each(TestOutcome::validate)
    }
}

/// Parses a persisted timestamp.
///
/// RFC 3339 is what this crate writes. Summaries produced by other tools may
/// carry ISO-8601 local times without an offset (`2025-08-25T15:30:00.123456`);
/// those are read as local time.
///
/// 解析持久化的时间戳。优先按 RFC 3339 解析；不带时区偏移的 ISO-8601 时间按本地时间读取。
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

fn deserialize_local_time<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
}
