// Shared test helpers for integration tests
#![allow(dead_code)]

use e2e_report::{ApiCall, TestOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Writes a suite file into `dir` and returns its path.
pub fn write_suite(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("Suite.toml");
    fs::write(&path, body).expect("Failed to write Suite.toml");
    path
}

/// A passing UI case and a failing one, as a desktop suite would record them.
pub fn desktop_outcomes() -> Vec<TestOutcome> {
    vec![
        TestOutcome::passed("Register user", Duration::from_millis(2100)),
        TestOutcome::failed(
            "Login with incorrect credentials",
            Duration::from_millis(500),
            "Error banner 'Your email or password is incorrect!' not visible",
        ),
    ]
}

/// Two API outcomes with response times of 100 ms and 300 ms.
pub fn api_outcomes() -> Vec<TestOutcome> {
    vec![
        TestOutcome::passed("Get all products", Duration::from_millis(150)).with_api(ApiCall::new(
            "GET",
            "https://automationexercise.com/api/productsList",
            200,
            Duration::from_millis(100),
        )),
        TestOutcome::failed("Search product", Duration::from_millis(350), "Expected 200, got 400")
            .with_api(ApiCall::new(
                "POST",
                "https://automationexercise.com/api/searchProduct",
                400,
                Duration::from_millis(300),
            )),
    ]
}
