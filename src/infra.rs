//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the reporting pipeline,
//! including the run logger, external command execution, file system
//! operations and i18n support.
//!
//! 此模块为报告流水线提供基础设施服务，
//! 包括运行日志、外部命令执行、文件系统操作和国际化支持。

pub mod command;
pub mod fs;
pub mod logger;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
