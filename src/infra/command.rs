//! # Command Execution Module / 命令执行模块
//!
//! Runs the external command of a suite case and captures what it printed.
//!
//! 运行套件用例的外部命令并捕获其输出。

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// The result of a finished command.
/// 已结束命令的结果。
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// `true` when the process exited with status 0.
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Stdout followed by stderr.
    pub output: String,
}

impl CommandOutput {
    /// Returns the last `max_lines` non-empty lines of the output.
    /// 返回输出中最后 `max_lines` 个非空行。
    pub fn tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self.output.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}

/// Splits a command line with shell-words rules.
///
/// # Errors
/// Fails on unbalanced quotes or an empty command line.
pub fn split_command(command_line: &str) -> Result<Vec<String>> {
    let parts = shlex::split(command_line)
        .with_context(|| format!("Failed to parse command line: {}", command_line))?;
    if parts.is_empty() {
        anyhow::bail!("Command line is empty");
    }
    Ok(parts)
}

/// Runs `command_line` in `working_dir` and waits for it to exit.
///
/// The child is killed if the returned future is dropped, so wrapping this in
/// a timeout stops the process as well.
///
/// # Arguments
/// * `command_line` - Program and arguments, shell-words quoted
/// * `working_dir` - Directory the process runs in
pub async fn run_command(command_line: &str, working_dir: &Path) -> Result<CommandOutput> {
    let parts = split_command(command_line)?;
    let (program, args) = parts.split_first().context("Command line is empty")?;

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("Failed to execute '{}'", command_line))?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }

    Ok(CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        output: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_respects_quotes() {
        let parts = split_command(r#"python -m pytest "tests/test login.py" -k 'valid user'"#).unwrap();
        assert_eq!(
            parts,
            vec!["python", "-m", "pytest", "tests/test login.py", "-k", "valid user"]
        );
    }

    #[test]
    fn test_split_command_rejects_bad_input() {
        assert!(split_command("echo 'unterminated").is_err());
        assert!(split_command("   ").is_err());
    }

    #[test]
    fn test_tail_keeps_last_lines() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            output: "one\n\ntwo\nthree\nfour\n".to_string(),
        };
        assert_eq!(output.tail(2), "three\nfour");
        assert_eq!(output.tail(10), "one\ntwo\nthree\nfour");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_captures_output_and_status() {
        let dir = tempfile::tempdir().unwrap();

        let ok = run_command("sh -c 'echo hello'", dir.path()).await.unwrap();
        assert!(ok.success);
        assert_eq!(ok.code, Some(0));
        assert_eq!(ok.output.trim(), "hello");

        let failed = run_command("sh -c 'echo boom >&2; exit 3'", dir.path()).await.unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert!(failed.output.contains("boom"));
    }

    #[tokio::test]
    async fn test_run_command_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command("this_command_definitely_does_not_exist_12345", dir.path()).await;
        assert!(result.is_err());
    }
}
