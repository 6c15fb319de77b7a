//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a persisted run summary into a styled, self-contained
//! HTML document: summary cards, a pass-rate bar and one collapsible block per
//! test outcome. Styles and script are embedded; the page makes no network
//! requests. Artifacts are referenced by file name only.
//!
//! 此模块将持久化的运行摘要渲染为样式化的独立 HTML 文档：摘要卡片、通过率进度条，
//! 以及每个测试结果一个可折叠区块。样式和脚本内嵌于页面，页面不发起任何网络请求。
//! 产物仅以文件名引用。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::path::{Path, PathBuf};

use crate::core::models::{RunSummary, TestOutcome};
use crate::core::summary;
use crate::infra::fs::{atomic_write, timestamped_path};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Presentation settings of a report.
/// 报告的展示设置。
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Report heading; a localized default is used when `None`.
    /// 报告标题；为 `None` 时使用本地化默认标题。
    pub title: Option<String>,
    /// Locale of the labels, e.g. "en" or "zh-CN".
    /// 标签的语言环境，例如 "en" 或 "zh-CN"。
    pub locale: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            locale: "en".to_string(),
        }
    }
}

/// Reads a persisted run summary and writes it as an HTML report.
///
/// 读取持久化的运行摘要并将其写为 HTML 报告。
///
/// # Arguments / 参数
/// * `summary_path` - The JSON summary written at the end of a run
///                    运行结束时写入的 JSON 摘要
/// * `output` - Where to write the report. Defaults to a timestamped file next
///              to the summary. Missing directories are created.
///              报告的写入位置。默认为摘要旁带时间戳的文件，缺失的目录会被创建。
/// * `options` - Title and locale / 标题和语言环境
///
/// # Returns / 返回值
/// The path of the written report / 写入的报告路径
///
/// # Errors / 错误
/// - [`ReportError::SummaryNotFound`](crate::core::error::ReportError::SummaryNotFound)
///   when `summary_path` does not exist; no report is written in that case
/// - The summary cannot be parsed or is inconsistent
/// - The report cannot be written
///
/// - 当 `summary_path` 不存在时返回 `SummaryNotFound`，此时不会写入任何报告
/// - 摘要无法解析或不一致
/// - 报告无法写入
pub fn render(summary_path: &Path, output: Option<&Path>, options: &RenderOptions) -> Result<PathBuf> {
    let summary = summary::load(summary_path)?;
    let html = render_html(&summary, options);

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = summary_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            timestamped_path(dir, "test_report", "html")
        }
    };

    atomic_write(&output_path, html.as_bytes())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(output_path)
}

/// Renders the HTML document of a run summary.
/// The generation time shown in the header is the only input besides `summary`
/// and `options`.
///
/// 渲染运行摘要的 HTML 文档。
/// 除 `summary` 和 `options` 外，唯一的输入是页眉中显示的生成时间。
pub fn render_html(summary: &RunSummary, options: &RenderOptions) -> String {
    let locale = options.locale.as_str();
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| t!("html_report.title", locale = locale).to_string());
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let pass_rate = summary.pass_rate();

    let markup = html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                div.container {
                    div.header {
                        h1 { (title) }
                        p { (t!("html_report.subtitle", locale = locale).to_string()) }
                        p.generated {
                            (t!("html_report.generated_on", locale = locale, time = generated_at).to_string())
                        }
                    }

                    div.summary {
                        div.summary-grid {
                            (summary_card("total", "total-count", summary.total.to_string(),
                                t!("html_report.summary.total", locale = locale).to_string()))
                            (summary_card("passed", "passed-count", summary.passed.to_string(),
                                t!("html_report.summary.passed", locale = locale).to_string()))
                            (summary_card("failed", "failed-count", summary.failed.to_string(),
                                t!("html_report.summary.failed", locale = locale).to_string()))
                            (summary_card("rate", "pass-rate", format!("{:.1}%", pass_rate),
                                t!("html_report.summary.pass_rate", locale = locale).to_string()))
                            @if let Some(calls) = summary.total_api_calls {
                                (summary_card("calls", "api-calls", calls.to_string(),
                                    t!("html_report.summary.api_calls", locale = locale).to_string()))
                            }
                            @if let Some(avg) = summary.avg_response_time {
                                (summary_card("response", "avg-response", format!("{:.1} ms", avg),
                                    t!("html_report.summary.avg_response", locale = locale).to_string()))
                            }
                        }
                        div.progress-bar {
                            div.progress-fill style=(format!("width: {:.1}%;", pass_rate)) {}
                        }
                    }

                    div.test-results {
                        h2 { (t!("html_report.details_header", locale = locale).to_string()) }
                        @if summary.outcomes.is_empty() {
                            p.empty { (t!("html_report.no_results", locale = locale).to_string()) }
                        }
                        @for (index, outcome) in summary.outcomes.iter().enumerate() {
                            (outcome_block(index, outcome, locale))
                        }
                    }

                    div.footer {
                        p { (t!("html_report.footer", locale = locale).to_string()) }
                    }
                }
                script { (PreEscaped(HTML_SCRIPT)) }
            }
        }
    };

    markup.into_string()
}

fn summary_card(class: &str, id: &str, value: String, label: String) -> Markup {
    html! {
        div class={ "summary-card " (class) } {
            h3 id=(id) { (value) }
            p { (label) }
        }
    }
}

fn outcome_block(index: usize, outcome: &TestOutcome, locale: &str) -> Markup {
    let status_class = outcome.status().css_class();
    let artifact_names = outcome.artifact_names();

    html! {
        div class={ "test-item " (status_class) } {
            div.test-header onclick={ "toggleDetails(" (index.to_string()) ")" } {
                div.test-name { (outcome.name()) }
                div class={ "test-status " (status_class) } { (outcome.status().label(locale)) }
            }
            div.test-details id={ "details-" (index.to_string()) } {
                div.test-meta {
                    (meta_item(t!("html_report.meta.duration", locale = locale).to_string(),
                        t!("html_report.meta.seconds", locale = locale,
                            value = format!("{:.2}", outcome.duration_seconds())).to_string()))
                    (meta_item(t!("html_report.meta.timestamp", locale = locale).to_string(),
                        outcome.timestamp().to_rfc3339()))
                    (meta_item(t!("html_report.meta.screenshots", locale = locale).to_string(),
                        t!("html_report.meta.captured", locale = locale,
                            count = artifact_names.len()).to_string()))
                    @if let Some(api) = outcome.api() {
                        (meta_item(t!("html_report.meta.request", locale = locale).to_string(),
                            format!("{} {}", api.method, api.endpoint)))
                        (meta_item(t!("html_report.meta.status_code", locale = locale).to_string(),
                            api.status_code.to_string()))
                        (meta_item(t!("html_report.meta.response_time", locale = locale).to_string(),
                            format!("{:.1} ms", api.response_time_ms)))
                    }
                }
                @if !outcome.details().is_empty() {
                    div.meta-item {
                        div.meta-label { (t!("html_report.meta.details", locale = locale).to_string()) }
                        div.meta-value.details { (outcome.details()) }
                    }
                }
                @if !artifact_names.is_empty() {
                    div.screenshots {
                        div.meta-label { (t!("html_report.meta.screenshots", locale = locale).to_string()) }
                        div.screenshot-grid {
                            @for name in &artifact_names {
                                div.screenshot-item { "📷 " (name) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn meta_item(label: String, value: String) -> Markup {
    html! {
        div.meta-item {
            div.meta-label { (label) }
            div.meta-value { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReportError;
    use crate::core::models::ApiCall;
    use std::time::Duration;
    use tempfile::tempdir;

    fn scenario_a() -> RunSummary {
        summary::build(vec![
            TestOutcome::passed("Register user", Duration::from_millis(2100)),
            TestOutcome::failed("Login", Duration::from_millis(500), "Logout link not visible"),
        ])
    }

    #[test]
    fn test_summary_cards() {
        let html = render_html(&scenario_a(), &RenderOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<h3 id="total-count">2</h3>"#));
        assert!(html.contains(r#"<h3 id="passed-count">1</h3>"#));
        assert!(html.contains(r#"<h3 id="failed-count">1</h3>"#));
        assert!(html.contains(r#"<h3 id="pass-rate">50.0%</h3>"#));
        assert!(html.contains("width: 50.0%;"));
        assert!(!html.contains("avg-response"));
        assert!(!html.contains("api-calls"));
    }

    #[test]
    fn test_one_block_per_outcome() {
        let html = render_html(&scenario_a(), &RenderOptions::default());

        assert!(html.contains(r#"id="details-0""#));
        assert!(html.contains(r#"id="details-1""#));
        assert!(!html.contains(r#"id="details-2""#));
        assert!(html.contains("Logout link not visible"));
        assert!(html.contains("2.10"));
        assert!(html.contains("0.50"));
    }

    #[test]
    fn test_empty_summary_renders_shell() {
        let html = render_html(&summary::build(vec![]), &RenderOptions::default());

        assert!(html.contains(r#"<h3 id="total-count">0</h3>"#));
        assert!(html.contains(r#"<h3 id="pass-rate">0.0%</h3>"#));
        assert!(html.contains("</html>"));
        assert!(!html.contains("details-0"));
    }

    #[test]
    fn test_artifacts_shown_by_name_in_order() {
        let summary = summary::build(vec![
            TestOutcome::failed("Checkout", Duration::from_secs(3), "payment form missing")
                .with_artifacts(["/tmp/screens/shot1.png", "/tmp/screens/shot2.png"]),
        ]);
        let html = render_html(&summary, &RenderOptions::default());

        let first = html.find("shot1.png").unwrap();
        let second = html.find("shot2.png").unwrap();
        assert!(first < second);
        assert!(!html.contains("/tmp/screens"));
    }

    #[test]
    fn test_text_is_escaped() {
        let summary = summary::build(vec![TestOutcome::failed(
            "<script>alert(1)</script>",
            Duration::from_secs(1),
            "expected <div> & got nothing",
        )]);
        let html = render_html(&summary, &RenderOptions::default());

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("expected &lt;div&gt; &amp; got nothing"));
    }

    #[test]
    fn test_api_metadata_and_average() {
        let summary = summary::build(vec![
            TestOutcome::passed("Get products", Duration::from_millis(400)).with_api(ApiCall::new(
                "GET",
                "https://automationexercise.com/api/productsList",
                200,
                Duration::from_millis(189),
            )),
        ]);
        let html = render_html(&summary, &RenderOptions::default());

        assert!(html.contains(r#"<h3 id="avg-response">189.0 ms</h3>"#));
        assert!(html.contains(r#"<h3 id="api-calls">1</h3>"#));
        assert!(html.contains("GET https://automationexercise.com/api/productsList"));
    }

    #[test]
    fn test_custom_title_and_locale() {
        let options = RenderOptions {
            title: Some("Desktop Web Automation Report".to_string()),
            locale: "zh-CN".to_string(),
        };
        let html = render_html(&scenario_a(), &options);

        assert!(html.contains("<title>Desktop Web Automation Report</title>"));
        assert!(html.contains(r#"<html lang="zh-CN">"#));
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempdir().unwrap();
        let summary_path = dir.path().join("summary.json");
        summary::persist(&scenario_a(), &summary_path).unwrap();

        let output = dir.path().join("html").join("report.html");
        let written = render(&summary_path, Some(&output), &RenderOptions::default()).unwrap();

        assert_eq!(written, output);
        assert!(std::fs::read_to_string(&output).unwrap().contains("50.0%"));
    }

    #[test]
    fn test_render_default_path_is_next_to_summary() {
        let dir = tempdir().unwrap();
        let summary_path = dir.path().join("summary.json");
        summary::persist(&scenario_a(), &summary_path).unwrap();

        let written = render(&summary_path, None, &RenderOptions::default()).unwrap();

        assert_eq!(written.parent(), Some(dir.path()));
        assert!(written.file_name().unwrap().to_string_lossy().starts_with("test_report_"));
    }

    #[test]
    fn test_render_missing_summary_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out").join("report.html");

        let err = render(&dir.path().join("absent.json"), Some(&output), &RenderOptions::default())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::SummaryNotFound(_))
        ));
        assert!(!output.exists());
        assert!(!dir.path().join("out").exists());
    }
}
