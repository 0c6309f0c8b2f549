//! Git 操作工具
//!
//! 所有辅助命令都直接调用 git 可执行文件，git 本身视为黑盒

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

pub mod authors;
pub mod logview;
pub mod rebase;
pub mod stash;

/// 执行 git 命令并返回标准输出（去掉首尾空白）
pub fn git_command(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    Ok(git_command_raw(args, cwd)?.trim().to_string())
}

/// 执行 git 命令并返回原始标准输出
///
/// porcelain 这类逐字段格式不能整体 trim：首条目以空格开头的
/// 状态前缀会被吃掉。
pub fn git_command_raw(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().context("Failed to execute git command")?;

    if !output.status.success() {
        anyhow::bail!(
            "Git command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// 执行 git 命令，stdout/stderr 直通终端，返回退出码
///
/// 用于 log / grep 这类输出即结果的命令，退出码原样返回
/// （git grep 用 1 表示无匹配）。
pub fn git_passthrough(args: &[&str], cwd: Option<&Path>) -> Result<i32> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd.status().context("Failed to execute git command")?;
    Ok(status.code().unwrap_or(1))
}

/// 获取 git 仓库根目录
pub fn get_git_root(cwd: Option<&Path>) -> Result<String> {
    git_command(&["rev-parse", "--show-toplevel"], cwd)
}

/// 当前分支名
pub fn current_branch(cwd: Option<&Path>) -> Result<String> {
    git_command(&["rev-parse", "--abbrev-ref", "HEAD"], cwd)
}

/// 本地分支列表
pub fn local_branches(cwd: Option<&Path>) -> Result<Vec<String>> {
    let output = git_command(
        &["for-each-ref", "refs/heads", "--format=%(refname:short)"],
        cwd,
    )?;

    Ok(output
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect())
}

/// 默认主分支：main 优先，其次 master
pub fn default_branch(cwd: Option<&Path>) -> Result<String> {
    for name in ["main", "master"] {
        if git_command(&["rev-parse", "--verify", "--quiet", name], cwd).is_ok() {
            return Ok(name.to_string());
        }
    }
    anyhow::bail!("Neither 'main' nor 'master' exists in this repository")
}

/// 检查当前目录是否在 git 仓库中
pub fn is_git_repo(cwd: Option<&Path>) -> bool {
    git_command(&["rev-parse", "--git-dir"], cwd).is_ok()
}

/// git 版本字符串，用于 doctor 诊断
pub fn git_version() -> Result<String> {
    git_command(&["--version"], None)
}
