//! # Run Logger Module / 运行日志模块
//!
//! The audit trail of a test session. Every call writes one
//! `<timestamp> - <LEVEL> - <message>` line to the log file and echoes it to
//! standard output with a colored level.
//!
//! 测试会话的审计记录。每次调用都会向日志文件写入一行
//! `<时间戳> - <级别> - <消息>`，并在标准输出中以彩色级别回显。

use crate::core::error::ReportError;
use chrono::Local;
use colored::*;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Timestamp layout of log lines, e.g. `2025-08-25 15:30:00,123`.
const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn colored(&self) -> ColoredString {
        match self {
            Level::Info => self.as_str().green(),
            Level::Warning => self.as_str().yellow(),
            Level::Error => self.as_str().red().bold(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Sink {
    file: File,
    /// First write failure, kept until `check` reports it.
    failure: Option<io::Error>,
}

/// Writes progress lines to a log file and to the console.
///
/// The file is opened in append mode, so opening the same path twice never
/// truncates it and each call produces exactly one line. A session owns one
/// `Logger` and lends it out by reference.
///
/// 将进度行写入日志文件和控制台。
/// 文件以追加模式打开，因此重复打开同一路径不会截断文件，每次调用恰好产生一行。
/// 一个会话拥有一个 `Logger` 并以引用方式借出。
pub struct Logger {
    path: PathBuf,
    sink: Mutex<Sink>,
    echo: bool,
}

impl Logger {
    /// Opens (or creates) the log file, creating its parent directory.
    ///
    /// # Errors
    /// Fails with [`ReportError::LogUnavailable`] when the file cannot be opened.
    /// Logging is the only audit trail of a run, so this is never ignored.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        let unavailable = |source: io::Error| ReportError::LogUnavailable {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(unavailable)?;

        Ok(Self {
            path,
            sink: Mutex::new(Sink {
                file,
                failure: None,
            }),
            echo: true,
        })
    }

    /// Disables the console copy; lines still go to the file.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message.as_ref());
    }

    pub fn log(&self, level: Level, message: &str) {
        let timestamp = Local::now().format(LOG_TIMESTAMP_FORMAT).to_string();

        {
            let mut sink = self.lock();
            if sink.failure.is_none() {
                let line = format!("{} - {} - {}\n", timestamp, level, message);
                if let Err(e) = sink.file.write_all(line.as_bytes()) {
                    sink.failure = Some(e);
                }
            }
        }

        if self.echo {
            println!("{} - {} - {}", timestamp.dimmed(), level.colored(), message);
        }
    }

    /// Flushes the file and reports the first write failure, if any.
    ///
    /// # Errors
    /// Returns [`ReportError::LogUnavailable`] when any line could not be written.
    pub fn check(&self) -> Result<(), ReportError> {
        let mut sink = self.lock();
        if let Some(source) = sink.failure.take() {
            return Err(ReportError::LogUnavailable {
                path: self.path.clone(),
                source,
            });
        }
        sink.file
            .flush()
            .map_err(|source| ReportError::LogUnavailable {
                path: self.path.clone(),
                source,
            })
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_line_format() {
        let dir = tempdir().unwrap();
        let logger = Logger::open(dir.path().join("run.log")).unwrap().quiet();

        logger.info("Navigating to home page");
        logger.warning("Ad banner still visible");
        logger.error("Login button not found");
        logger.check().unwrap();

        let lines = lines(logger.path());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" - INFO - Navigating to home page"));
        assert!(lines[1].ends_with(" - WARNING - Ad banner still visible"));
        assert!(lines[2].ends_with(" - ERROR - Login button not found"));

        // "2025-08-25 15:30:00,123" is 23 characters long.
        let (timestamp, _) = lines[0].split_once(" - ").unwrap();
        assert_eq!(timestamp.len(), 23);
        assert_eq!(&timestamp[19..20], ",");
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("run.log");

        let logger = Logger::open(&path).unwrap().quiet();
        logger.info("started");

        assert!(path.exists());
    }

    #[test]
    fn test_opening_twice_neither_truncates_nor_duplicates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");

        let first = Logger::open(&path).unwrap().quiet();
        first.info("one");
        let second = Logger::open(&path).unwrap().quiet();
        second.info("two");
        first.check().unwrap();
        second.check().unwrap();

        let lines = lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO - one"));
        assert!(lines[1].ends_with("INFO - two"));
    }

    #[test]
    fn test_open_fails_fast_on_directory_path() {
        let dir = tempdir().unwrap();
        let err = Logger::open(dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::LogUnavailable { .. }));
    }
}
