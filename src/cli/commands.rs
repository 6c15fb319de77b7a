//! # CLI Commands / CLI 命令
//!
//! One module per subcommand.
//!
//! 每个子命令对应一个模块。

pub mod init;
pub mod render;
pub mod run;
pub mod show;
