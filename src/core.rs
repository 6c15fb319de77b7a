//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the reporting pipeline:
//! data models, the result collector, summary building and persistence,
//! the session context and test case execution.
//!
//! 此模块包含报告流水线的核心功能：
//! 数据模型、结果收集器、摘要构建与持久化、会话上下文和测试用例执行。

pub mod artifacts;
pub mod collector;
pub mod config;
pub mod error;
pub mod execution;
pub mod models;
pub mod session;
pub mod summary;

// Re-exports
pub use collector::ResultCollector;
pub use config::SuiteConfig;
pub use execution::{run_case, run_command_case, run_suite, CaseFailure, CaseReport, SuiteProgress};
pub use models::{RunSummary, TestOutcome};
pub use session::Session;
