//! # E2E Report Library / E2E 报告库
//!
//! This library collects the outcomes of end-to-end UI and API test cases,
//! logs progress, persists a JSON run summary and renders it as a static
//! HTML report.
//!
//! 此库收集端到端 UI 和 API 测试用例的结果，记录执行进度，
//! 持久化 JSON 运行摘要并将其渲染为静态 HTML 报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, result collection, summaries, sessions and case execution
//! - `infra` - Infrastructure services like logging, command execution and file system operations
//! - `reporting` - HTML report rendering and console output
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、结果收集、摘要、会话和用例执行
//! - `infra` - 基础设施服务，如日志、命令执行和文件系统操作
//! - `reporting` - HTML 报告渲染和控制台输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::collector::ResultCollector;
pub use crate::core::execution::{CaseFailure, CaseReport};
pub use crate::core::error::ReportError;
pub use crate::core::models::{ApiCall, RunSummary, TestOutcome, TestStatus};
pub use crate::core::session::{Session, SessionReport};
pub use crate::infra::logger::Logger;

/// Resolves the locale to use for user-facing messages.
///
/// An explicit request (from `--lang` or the suite file) wins; otherwise the
/// system locale is used. The full locale (e.g. "zh-CN") is tried first, then
/// the language part only (e.g. "en" from "en-US"), then "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Initializes the application's internationalization (i18n) from the system locale.
pub fn init() {
    rust_i18n::set_locale(&resolve_locale(None));
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
