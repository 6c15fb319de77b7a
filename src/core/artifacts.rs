//! # Artifacts Module / 产物模块
//!
//! Evidence files produced while a test case runs: screenshot paths, captured
//! API request/response exchanges, and files a suite command left behind.
//! Outcomes reference artifacts by path only.
//!
//! 测试用例运行期间产生的证据文件：截图路径、捕获的 API 请求/响应交换记录，
//! 以及套件命令遗留的文件。结果仅通过路径引用产物。

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::infra::fs::{atomic_write, sanitize_file_stem, timestamped_path};

/// Builds `<dir>/<name>_<timestamp>.png` for a screenshot about to be taken.
/// The directory is not created.
pub fn screenshot_path(dir: &Path, name: &str) -> PathBuf {
    timestamped_path(dir, &sanitize_file_stem(name), "png")
}

/// One HTTP request made by an API test, with the response it got.
/// API 测试发起的一次 HTTP 请求及其响应。
#[derive(Debug, Clone, Serialize)]
pub struct ApiExchange {
    pub test_name: String,
    pub method: String,
    pub url: String,
    pub request_data: Value,
    pub status_code: u16,
    pub response_data: Value,
}

/// Saves an exchange as `<dir>/<test>_<METHOD>_<timestamp>.json` for debugging.
///
/// The file holds `test_name`, `timestamp`, `request {method, url, data}` and
/// `response {status_code, data}`.
///
/// # Returns
/// The written path, ready to be attached to the outcome as an artifact
pub fn save_exchange(dir: &Path, exchange: &ApiExchange) -> Result<PathBuf> {
    let method = exchange.method.to_uppercase();
    let path = timestamped_path(
        dir,
        &format!("{}_{}", sanitize_file_stem(&exchange.test_name), method),
        "json",
    );
    let record = json!({
        "test_name": exchange.test_name,
        "timestamp": Local::now().to_rfc3339(),
        "request": {
            "method": method,
            "url": exchange.url,
            "data": exchange.request_data,
        },
        "response": {
            "status_code": exchange.status_code,
            "data": exchange.response_data,
        },
    });

    let content = serde_json::to_string_pretty(&record).context("Failed to serialize API exchange")?;
    atomic_write(&path, content.as_bytes())?;
    Ok(path)
}

/// Expands glob patterns relative to `base` into existing files.
///
/// Matches of each pattern are sorted; patterns keep their order and a file
/// matched twice is listed once.
///
/// # Errors
/// Fails on a malformed pattern.
pub fn collect_artifacts(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::new();

    for pattern in patterns {
        let full = base.join(pattern);
        let full = full.to_string_lossy();
        let mut matches: Vec<PathBuf> = glob::glob(&full)
            .with_context(|| format!("Invalid artifact pattern: {}", pattern))?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        matches.sort();

        for path in matches {
            if seen.insert(path.clone()) {
                artifacts.push(path);
            }
        }
    }
    Ok(artifacts)
}
