//! 分支暂存
//!
//! 把当前分支名压入 .git/BRANCH_STASH 栈并切回默认分支，
//! unstash 弹出栈顶并切回去。栈是每行一个分支名的纯文本文件。

use anyhow::{bail, Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::{current_branch, default_branch, git_command};

const STASH_FILE: &str = "BRANCH_STASH";

/// 栈文件放在 git dir 里
///
/// linked worktree 和 submodule 里 `<root>/.git` 是文件不是目录，
/// 真实位置交给 `rev-parse --git-dir` 解析。相对结果以执行目录为基准。
fn stash_file(cwd: Option<&Path>) -> Result<PathBuf> {
    let git_dir = PathBuf::from(git_command(&["rev-parse", "--git-dir"], cwd)?);

    let git_dir = if git_dir.is_relative() {
        match cwd {
            Some(dir) => dir.join(git_dir),
            None => std::env::current_dir()?.join(git_dir),
        }
    } else {
        git_dir
    };

    Ok(git_dir.join(STASH_FILE))
}

fn read_stack(file: &Path) -> Vec<String> {
    fs::read_to_string(file)
        .map(|content| {
            content
                .lines()
                .filter(|l| !l.is_empty())
                .map(|l| l.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn write_stack(file: &Path, stack: &[String]) -> Result<()> {
    let mut content = stack.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(file, content)
        .with_context(|| format!("Failed to write branch stash: {}", file.display()))
}

/// 暂存当前分支并切换到默认分支
pub fn stash_branch(cwd: Option<&Path>) -> Result<()> {
    let branch = current_branch(cwd)?;
    let base = default_branch(cwd)?;

    if branch == base {
        bail!("Already on '{}', nothing to stash", base);
    }

    let file = stash_file(cwd)?;
    let mut stack = read_stack(&file);
    stack.push(branch.clone());
    write_stack(&file, &stack)?;

    git_command(&["checkout", &base], cwd)?;

    println!(
        "{} Stashed branch {} (now on {})",
        "✓".green(),
        branch.yellow(),
        base.cyan()
    );
    Ok(())
}

/// 弹出最近暂存的分支并切回
pub fn unstash_branch(cwd: Option<&Path>) -> Result<()> {
    let file = stash_file(cwd)?;
    let mut stack = read_stack(&file);

    let branch = match stack.pop() {
        Some(branch) => branch,
        None => bail!("Branch stash is empty - nothing to restore"),
    };

    // 先 checkout 再收缩栈，切换失败时不丢记录
    git_command(&["checkout", &branch], cwd)?;
    write_stack(&file, &stack)?;

    println!("{} Back on {}", "✓".green(), branch.yellow());
    Ok(())
}
