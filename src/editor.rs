//! 编辑器辅助
//!
//! 把工作区里修改过和未跟踪的文件交给 $VISUAL / $EDITOR 打开

use anyhow::{Context, Result};
use colored::*;
use std::env;
use std::path::Path;
use std::process::Command;

use crate::git::git_command_raw;

/// 选择编辑器：VISUAL 优先，其次 EDITOR，最后 vi
pub fn editor_program() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string())
}

/// 收集修改过和未跟踪的文件（相对仓库根）
///
/// 用 `--porcelain -z` 按 NUL 切分，状态前缀（"XY "）显式剥离。
/// 按行 + 固定偏移解析会在首条目是未暂存修改（" M file"）时
/// 掉进整体 trim 的坑：前导空格被吃掉，偏移错位。
pub fn changed_files(cwd: Option<&Path>) -> Result<Vec<String>> {
    let output = git_command_raw(&["status", "--porcelain", "-z"], cwd)?;

    let mut files = Vec::new();
    let mut entries = output.split('\0').filter(|e| !e.is_empty());
    while let Some(entry) = entries.next() {
        if entry.len() < 4 {
            continue;
        }
        let (status, path) = entry.split_at(3);
        files.push(path.to_string());

        // rename/copy 条目的旧路径是后面一个单独的 NUL 字段，跳过
        let xy = &status[..2];
        if xy.contains('R') || xy.contains('C') {
            entries.next();
        }
    }
    Ok(files)
}

/// 打开编辑器编辑所有变更文件，返回编辑器的退出码
pub fn edit_changed(cwd: Option<&Path>) -> Result<i32> {
    let files = changed_files(cwd)?;

    if files.is_empty() {
        println!("{}", "Working tree clean - nothing to edit".yellow());
        return Ok(0);
    }

    let editor = editor_program();
    println!(
        "✎ Opening {} file(s) in {}",
        files.len().to_string().green(),
        editor.cyan()
    );

    let mut cmd = Command::new(&editor);
    cmd.args(&files);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    Ok(status.code().unwrap_or(1))
}
