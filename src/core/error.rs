//! # Error Types / 错误类型
//!
//! Typed error conditions that callers of the library need to tell apart.
//! Everything else is propagated as `anyhow::Error` with context.
//!
//! 调用方需要区分的类型化错误。其余错误均以带上下文的 `anyhow::Error` 传播。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// No persisted run summary exists at the given path.
    /// A report is never synthesized from placeholder data.
    /// 给定路径上不存在持久化的运行摘要。绝不使用占位数据生成报告。
    #[error("no test results found: {} does not exist", .0.display())]
    SummaryNotFound(PathBuf),

    /// A run summary breaks its invariants or holds a value JSON cannot represent.
    /// 运行摘要违反其不变量，或包含 JSON 无法表示的值。
    #[error("invalid run summary: {0}")]
    InvalidSummary(String),

    /// The log destination could not be opened or written.
    /// 无法打开或写入日志文件。
    #[error("log file {} is unavailable: {source}", .path.display())]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    /// Maps the error onto the closest `std::io::ErrorKind`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ReportError::SummaryNotFound(_) => io::ErrorKind::NotFound,
            ReportError::InvalidSummary(_) => io::ErrorKind::InvalidData,
            ReportError::LogUnavailable { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = ReportError::SummaryNotFound(PathBuf::from("reports/missing.json"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("reports/missing.json"));
    }

    #[test]
    fn test_log_unavailable_keeps_source_kind() {
        let err = ReportError::LogUnavailable {
            path: PathBuf::from("/logs/run.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
