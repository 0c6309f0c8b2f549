//! 委托命令执行
//!
//! 以匹配到的项目目录为工作目录执行工具命令，透传退出码

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use super::markers::MarkerRule;

/// 执行被委托的命令，阻塞到结束，返回其退出码
///
/// 目录通过 `current_dir` 显式传给子进程，调度器自身的工作目录
/// 从不改变。退出码原样返回、不做解释；被信号终止时没有退出码，
/// 统一按 1 处理。
pub fn run_delegated(rule: &MarkerRule, dir: &Path, args: &[String]) -> Result<i32> {
    let status = Command::new(&rule.program)
        .args(&rule.prefix_args)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| {
            format!(
                "Failed to execute '{}'. Is it installed and in PATH?",
                rule.program
            )
        })?;

    Ok(status.code().unwrap_or(1))
}
