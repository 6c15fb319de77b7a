//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of test reports.
//! It renders persisted run summaries into styled, self-contained HTML
//! documents and prints colorful, localized summaries to the console.
//!
//! 此模块处理测试报告的生成和显示。
//! 它将持久化的运行摘要渲染为样式化的独立 HTML 文档，并在控制台打印彩色的本地化摘要。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_session_footer, print_summary};
pub use html::{render, render_html};
