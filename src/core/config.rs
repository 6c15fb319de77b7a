//! # Suite Configuration Module / 套件配置模块
//!
//! Loads the TOML file describing a command-driven suite: where logs and
//! reports go, and which cases to run.
//!
//! 加载描述命令驱动套件的 TOML 文件：日志和报告的存放位置以及要运行的用例。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::fs::{expand_path, timestamped_path};

/// A single test case run as an external command.
/// 作为外部命令运行的单个测试用例。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuiteCase {
    /// The name the outcome is recorded under.
    /// 记录结果时使用的名称。
    pub name: String,
    /// The command line to execute, split with shell-words rules.
    /// 要执行的命令行，按 shell 分词规则拆分。
    pub command: String,
    /// Optional timeout in seconds. A case running longer is recorded as failed.
    /// 可选的超时时间（秒）。运行超时的用例记为失败。
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Directory the command runs in, relative to the configuration file.
    /// 命令运行的目录，相对于配置文件。
    #[serde(default)]
    pub working_dir: Option<String>,
    /// Glob patterns of files the command produces as evidence (e.g. screenshots).
    /// 命令作为证据生成的文件的 glob 模式（例如截图）。
    #[serde(default)]
    pub artifacts: Vec<String>,
}

/// Where the run's log, summary and report are written.
/// 运行日志、摘要和报告的写入位置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
    /// Fixed HTML file name. When absent a timestamped name is used.
    /// 固定的 HTML 文件名。缺省时使用带时间戳的文件名。
    #[serde(default)]
    pub html_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            reports_dir: default_reports_dir(),
            summary_file: default_summary_file(),
            html_file: None,
        }
    }
}

/// The complete suite configuration.
/// 完整的套件配置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuiteConfig {
    /// Short suite name used in file names, e.g. "desktop", "api", "android".
    /// 用于文件名的套件简称，例如 "desktop"、"api"、"android"。
    #[serde(default = "default_suite")]
    pub suite: String,

    /// The language for output messages and report labels (e.g. "en", "zh-CN").
    /// 输出消息和报告标签的语言（例如 "en"、"zh-CN"）。
    #[serde(default)]
    pub language: Option<String>,

    /// Report heading. Defaults to a localized title.
    /// 报告标题。默认使用本地化标题。
    #[serde(default)]
    pub title: Option<String>,

    /// Stop after the first failed case.
    /// 在第一个失败用例后停止。
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub cases: Vec<SuiteCase>,

    /// Directory relative paths are resolved against. Set when loading.
    /// 相对路径的解析基准目录，加载时设置。
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            suite: default_suite(),
            language: None,
            title: None,
            fail_fast: false,
            output: OutputConfig::default(),
            cases: vec![],
            base_dir: PathBuf::from("."),
        }
    }
}

impl SuiteConfig {
    /// Creates a configuration writing under `base_dir` with default file names.
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        expand_path(&self.output.log_dir, &self.base_dir)
    }

    pub fn reports_dir(&self) -> Result<PathBuf> {
        expand_path(&self.output.reports_dir, &self.base_dir)
    }

    /// `<log_dir>/<suite>_run_<timestamp>.log`
    pub fn log_path(&self) -> Result<PathBuf> {
        Ok(timestamped_path(
            &self.log_dir()?,
            &format!("{}_run", self.suite),
            "log",
        ))
    }

    pub fn summary_path(&self) -> Result<PathBuf> {
        Ok(self.reports_dir()?.join(&self.output.summary_file))
    }

    /// The configured HTML file, or `<reports_dir>/<suite>_report_<timestamp>.html`.
    pub fn html_path(&self) -> Result<PathBuf> {
        let reports_dir = self.reports_dir()?;
        Ok(match &self.output.html_file {
            Some(file) => reports_dir.join(file),
            None => timestamped_path(&reports_dir, &format!("{}_report", self.suite), "html"),
        })
    }

    /// Resolves the working directory of a case.
    pub fn case_dir(&self, case: &SuiteCase) -> Result<PathBuf> {
        match &case.working_dir {
            Some(dir) => expand_path(dir, &self.base_dir),
            None => Ok(self.base_dir.clone()),
        }
    }
}

fn default_suite() -> String {
    "e2e".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

fn default_summary_file() -> String {
    "test_execution_summary.json".to_string()
}

/// Loads a suite configuration; relative paths inside it resolve against the
/// file's directory.
///
/// # Arguments
/// * `path` - Path of the TOML file
pub fn load_suite_config(path: &Path) -> Result<SuiteConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read suite config: {}", path.display()))?;
    let mut config: SuiteConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse suite config: {}", path.display()))?;

    config.base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if let Some(case) = config.cases.iter().find(|c| c.command.trim().is_empty()) {
        anyhow::bail!("Case '{}' has an empty command", case.name);
    }
    Ok(config)
}
