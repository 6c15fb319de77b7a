//! # Pipeline Integration Tests / 流水线集成测试
//!
//! Exercises the whole path from recorded outcomes to the JSON summary and the
//! HTML report through the public API.
//!
//! 通过公共 API 测试从记录结果到 JSON 摘要和 HTML 报告的完整路径。

mod common;

use e2e_report::core::summary;
use e2e_report::reporting::html::{render, RenderOptions};
use e2e_report::{Logger, ReportError, ResultCollector, Session, TestOutcome};
use e2e_report::core::config::SuiteConfig;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn options() -> RenderOptions {
    RenderOptions::default()
}

#[test]
fn test_counts_match_record_calls() {
    let mut collector = ResultCollector::new();
    for outcome in common::desktop_outcomes().into_iter().chain(common::api_outcomes()) {
        collector.record(outcome);
    }
    assert_eq!(collector.len(), 4);

    let run = summary::build(collector.drain());
    assert_eq!(run.total, 4);
    assert_eq!(run.passed + run.failed, run.total);
    assert!(collector.is_empty());
}

#[test]
fn test_round_trip_keeps_counts() {
    let dir = tempdir().unwrap();
    for outcomes in [common::desktop_outcomes(), common::api_outcomes(), vec![]] {
        let built = summary::build(outcomes);
        let path = summary::persist(&built, &dir.path().join("summary.json")).unwrap();

        let loaded = summary::load(&path).unwrap();
        assert_eq!(loaded.total, built.total);
        assert_eq!(loaded.passed, built.passed);
        assert_eq!(loaded.failed, built.failed);
        assert_eq!(loaded.outcomes, built.outcomes);

        let report = render(&path, Some(dir.path().join("report.html").as_path()), &options()).unwrap();
        let html = fs::read_to_string(report).unwrap();
        assert!(html.contains(&format!(r#"<h3 id="total-count">{}</h3>"#, built.total)));
    }
}

#[test]
fn test_one_pass_one_fail() {
    let dir = tempdir().unwrap();
    let run = summary::build(common::desktop_outcomes());
    assert_eq!((run.total, run.passed, run.failed), (2, 1, 1));
    assert_eq!(run.pass_rate(), 50.0);

    let path = summary::persist(&run, &dir.path().join("reports/summary.json")).unwrap();
    let html = fs::read_to_string(render(&path, None, &options()).unwrap()).unwrap();
    assert!(html.contains(r#"<h3 id="pass-rate">50.0%</h3>"#));
    assert!(html.contains("width: 50.0%;"));
}

#[test]
fn test_empty_run_renders_shell() {
    let dir = tempdir().unwrap();
    let run = summary::build(vec![]);
    assert_eq!((run.total, run.passed, run.failed), (0, 0, 0));
    assert_eq!(run.pass_rate(), 0.0);

    let path = summary::persist(&run, &dir.path().join("summary.json")).unwrap();
    let html = fs::read_to_string(render(&path, None, &options()).unwrap()).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<h3 id="pass-rate">0.0%</h3>"#));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_screenshots_render_in_order() {
    let dir = tempdir().unwrap();
    let outcome = TestOutcome::failed("Checkout", Duration::from_secs(3), "Payment form missing")
        .with_artifacts(["screenshots/shot1.png", "screenshots/shot2.png"]);
    let path = summary::persist(&summary::build(vec![outcome]), &dir.path().join("s.json")).unwrap();

    let html = fs::read_to_string(render(&path, None, &options()).unwrap()).unwrap();
    let first = html.find("shot1.png").expect("first screenshot listed");
    let second = html.find("shot2.png").expect("second screenshot listed");
    assert!(first < second);
    assert!(!html.contains("screenshots/shot1.png"));
}

#[test]
fn test_average_response_over_api_outcomes_only() {
    let mut outcomes = common::api_outcomes();
    outcomes.extend(common::desktop_outcomes());
    let run = summary::build(outcomes);
    assert_eq!(run.avg_response_time, Some(200.0));

    let desktop_only = summary::build(common::desktop_outcomes());
    assert_eq!(desktop_only.avg_response_time, None);
}

#[test]
fn test_render_missing_summary_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.html");

    let err = render(&dir.path().join("missing.json"), Some(output.as_path()), &options()).unwrap_err();
    let typed = err.downcast_ref::<ReportError>().expect("typed error");
    assert!(matches!(typed, ReportError::SummaryNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_session_end_to_end() {
    let dir = tempdir().unwrap();
    let config = SuiteConfig::in_dir(dir.path());
    let logger = Logger::open(config.log_path().unwrap()).unwrap().quiet();
    let mut session = Session::with_logger(config, logger, "en");
    for outcome in common::desktop_outcomes() {
        session.record(outcome);
    }

    let report = session.finish().unwrap();
    assert_eq!(report.summary_path, dir.path().join("reports/test_execution_summary.json"));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report.summary_path).unwrap()).unwrap();
    assert_eq!(json["total_tests"], 2);
    assert_eq!(json["passed"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["test_results"][1]["status"], "FAIL");
    assert!(report.html_path.unwrap().exists());
}

#[test]
fn test_render_summary_with_local_timestamps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports/test_execution_summary.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{
  "total_tests": 2,
  "passed": 1,
  "failed": 1,
  "execution_time": "2025-08-25T15:30:00.123456",
  "test_results": [
    {"test_name": "Register user", "status": "PASS", "duration": 2.1, "details": "",
     "screenshots": [], "timestamp": "2025-08-25T15:29:50.500000"},
    {"test_name": "Login", "status": "FAIL", "duration": 0.5, "details": "Logout link not visible",
     "screenshots": ["screenshots/login_20250825_152958.png"], "timestamp": "2025-08-25T15:29:58.000001"}
  ]
}"#,
    )
    .unwrap();

    let report = render(&path, None, &options()).unwrap();
    let html = fs::read_to_string(report).unwrap();
    assert!(html.contains(r#"<h3 id="pass-rate">50.0%</h3>"#));
    assert!(html.contains("login_20250825_152958.png"));
    assert!(html.contains("2025-08-25T15:29:58.000001"));
}
